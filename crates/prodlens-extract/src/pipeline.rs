//! Two-stage extraction: tool-driven gathering, then schema coercion.

use prodlens_core::{AnalyzeRequest, AppConfig, ProductAnalysisData};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::brightdata::BrightDataClient;
use crate::error::ExtractError;
use crate::openai::{json_schema_format, ChatClient, ChatMessage, ToolCall, ToolDefinition};

pub const AMAZON_PRODUCT_TOOL: &str = "amazonProduct";

const AMAZON_PRODUCT_TOOL_DESCRIPTION: &str = "Get detailed Amazon product information including price, ratings, reviews, and specifications. Requires a valid Amazon product URL.";

const SCHEMA_NAME: &str = "product_analysis";

const SYSTEM_PROMPT: &str = "\
You extract Amazon product data by calling the provided tools.
RULES:
- Use tools to fetch data. Do not browse outside tools.
- Fill fields ONLY if they are explicitly present in tool output.
- Extract ALL available fields:
  * Core: title, images (array), initial_price, final_price, discount, currency, rating, reviews_count, features
  * Images: images array (all product image URLs)
  * Specifications: product_details array (type/value pairs)
  * Delivery: delivery array - classify as 'standard' or 'fast' type based on content
  * Seller: seller_name, ships_from, buybox_seller
  * Reviews: customer_says (summary), top_review (full text)
  * Rankings: bs_rank, subcategory_rank array
  * Categories: categories array
  * Stock: availability, max_quantity_available
- Price values must be numeric (no currency symbols/commas).
- For delivery, mark as 'fast' if it mentions 'fastest', 'tomorrow', 'same day', or 'express'.";

/// Arguments the model passes to the `amazonProduct` tool.
#[derive(Debug, Deserialize, JsonSchema)]
struct AmazonProductArgs {
    /// Amazon product URL (must contain /dp/ or /gp/product/)
    url: String,
    /// ZIP code for location-specific pricing and availability
    #[serde(default)]
    zipcode: Option<String>,
}

/// Runs the extraction for one product URL.
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Extractor {
    chat: ChatClient,
    brightdata: BrightDataClient,
    max_steps: u32,
}

impl Extractor {
    #[must_use]
    pub fn new(chat: ChatClient, brightdata: BrightDataClient, max_steps: u32) -> Self {
        Self {
            chat,
            brightdata,
            max_steps,
        }
    }

    /// Builds both upstream clients from application configuration.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] if either HTTP client cannot be built or a
    /// base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let chat = ChatClient::with_base_url(
            &config.openai_api_key,
            &config.openai_model,
            config.upstream_timeout_secs,
            &config.openai_base_url,
        )?;
        let brightdata = BrightDataClient::with_base_url(
            &config.brightdata_api_key,
            &config.brightdata_dataset_id,
            config.upstream_timeout_secs,
            &config.brightdata_base_url,
        )?;
        Ok(Self::new(chat, brightdata, config.max_steps))
    }

    /// Extracts and validates a product record for `request.url`.
    ///
    /// # Errors
    ///
    /// Any upstream failure, a model that never stops calling tools, output
    /// that does not deserialize, or a record that fails
    /// [`ProductAnalysisData::validate`].
    pub async fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<ProductAnalysisData, ExtractError> {
        tracing::info!(
            product_url = %request.url,
            zipcode = request.zipcode.as_deref().unwrap_or(""),
            model = self.chat.model(),
            "starting product extraction"
        );

        let gathered = self.gather(request).await?;
        let data = self.structure(&gathered).await?;

        tracing::info!(
            product_url = %request.url,
            has_pricing = data.pricing.is_some(),
            images = data.images.as_ref().map_or(0, Vec::len),
            "product extraction complete"
        );
        Ok(data)
    }

    /// Stage one: lets the model call `amazonProduct` until it answers.
    async fn gather(&self, request: &AnalyzeRequest) -> Result<String, ExtractError> {
        let tools = [amazon_product_tool()];
        let mut messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(request)),
        ];

        for step in 1..=self.max_steps {
            let reply = self.chat.complete(&messages, &tools, None).await?;

            if reply.tool_calls.is_empty() {
                tracing::debug!(step, "model finished gathering");
                return reply
                    .content
                    .filter(|text| !text.trim().is_empty())
                    .ok_or(ExtractError::EmptyResponse);
            }

            let calls = reply.tool_calls.clone();
            messages.push(reply);
            for call in &calls {
                let output = self.run_tool(call).await;
                messages.push(ChatMessage::tool(call.id.clone(), output));
            }
        }

        Err(ExtractError::StepLimit {
            max_steps: self.max_steps,
        })
    }

    /// Executes one tool call. Failures are reported back to the model as
    /// text rather than aborting the extraction.
    async fn run_tool(&self, call: &ToolCall) -> String {
        if call.function.name != AMAZON_PRODUCT_TOOL {
            tracing::warn!(tool = %call.function.name, "model called an unknown tool");
            return format!("Unknown tool: {}", call.function.name);
        }

        let args: AmazonProductArgs = match serde_json::from_str(&call.function.arguments) {
            Ok(args) => args,
            Err(e) => return format!("Error fetching Amazon product data: invalid arguments: {e}"),
        };

        match self
            .brightdata
            .collect_product(&args.url, args.zipcode.as_deref())
            .await
        {
            Ok(records) => serde_json::to_string_pretty(&records)
                .unwrap_or_else(|_| records.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, product_url = %args.url, "amazonProduct tool failed");
                format!("Error fetching Amazon product data: {e}")
            }
        }
    }

    /// Stage two: restates the gathered text under the record's JSON schema.
    async fn structure(&self, gathered: &str) -> Result<ProductAnalysisData, ExtractError> {
        let format = json_schema_format(SCHEMA_NAME, product_schema());
        let messages = [ChatMessage::user(format!(
            "Output this '{gathered}' to the product analysis schema."
        ))];

        let reply = self.chat.complete(&messages, &[], Some(&format)).await?;
        let content = reply.content.ok_or(ExtractError::EmptyResponse)?;

        let data: ProductAnalysisData =
            serde_json::from_str(&content).map_err(|e| ExtractError::Deserialize {
                context: "structured product analysis".to_string(),
                source: e,
            })?;
        data.validate()?;
        Ok(data)
    }
}

fn user_prompt(request: &AnalyzeRequest) -> String {
    match request.zipcode.as_deref() {
        Some(zip) if !zip.is_empty() => format!(
            "Extract product data for this Amazon URL:\n{}\nZipcode: {zip}",
            request.url
        ),
        _ => format!("Extract product data for this Amazon URL:\n{}", request.url),
    }
}

fn amazon_product_tool() -> ToolDefinition {
    ToolDefinition::function(
        AMAZON_PRODUCT_TOOL,
        AMAZON_PRODUCT_TOOL_DESCRIPTION,
        schemars::schema_for!(AmazonProductArgs).to_value(),
    )
}

/// JSON schema of [`ProductAnalysisData`] sent as the response format.
#[must_use]
pub fn product_schema() -> Value {
    schemars::schema_for!(ProductAnalysisData).to_value()
}
