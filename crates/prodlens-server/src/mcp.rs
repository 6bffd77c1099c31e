//! MCP tools served over streamable HTTP at `/mcp`.

use std::sync::Arc;

use prodlens_core::{AnalyzeRequest, ProductView};
use prodlens_extract::Extractor;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeProductRequest {
    #[schemars(description = "Amazon product URL (must contain /dp/ or /gp/product/)")]
    pub url: String,
    #[schemars(description = "Optional ZIP code for location-specific pricing")]
    #[serde(default)]
    pub zipcode: Option<String>,
}

fn err(e: impl std::fmt::Display) -> ErrorData {
    ErrorData::internal_error(e.to_string(), None::<Value>)
}

fn json_ok(value: &impl serde::Serialize) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string(value).map_err(err)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Static description of the framework this server was built with.
pub fn brand_info() -> Value {
    json!({
        "name": "mcp-use",
        "tagline": "Build MCP servers with UI widgets in minutes",
        "description": "mcp-use is a modern framework for building Model Context Protocol (MCP) servers with automatic UI widget registration, making it easy to create interactive AI tools and resources.",
        "founded": "2025",
        "mission": "To simplify the development of MCP servers and make AI integration accessible for developers",
        "values": [
            "Developer Experience",
            "Simplicity",
            "Performance",
            "Open Source",
            "Innovation",
        ],
        "contact": {
            "website": "https://mcp-use.com",
            "docs": "https://docs.mcp-use.com",
            "github": "https://github.com/mcp-use/mcp-use",
        },
        "features": [
            "Automatic UI widget registration",
            "React component support",
            "Full TypeScript support",
            "Built-in HTTP server",
            "MCP protocol compliance",
        ],
    })
}

#[derive(Clone)]
pub struct ProdlensMcp {
    extractor: Arc<Extractor>,
    /// Public base URL used to route product images through the proxy.
    base_url: String,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ProdlensMcp {
    pub fn new(extractor: Arc<Extractor>, base_url: String) -> Self {
        Self {
            extractor,
            base_url,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "get-brand-info",
        description = "Get information about the brand, including company details, mission, and values"
    )]
    async fn get_brand_info(&self) -> Result<CallToolResult, ErrorData> {
        json_ok(&brand_info())
    }

    #[tool(
        name = "analyze-amazon-product",
        description = "Analyze an Amazon product page: pricing and deal quality, features, delivery, seller, reviews and specifications. Product images are served through this server's image proxy."
    )]
    async fn analyze_amazon_product(
        &self,
        req: Parameters<AnalyzeProductRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = AnalyzeRequest {
            url: req.0.url,
            zipcode: req.0.zipcode.filter(|z| !z.is_empty()),
        };
        let data = self
            .extractor
            .analyze(&request)
            .await
            .map_err(|e| err(format!("Failed to analyze product: {e}")))?;

        json_ok(&ProductView::build(&data, Some(&self.base_url)))
    }
}

#[tool_handler]
impl ServerHandler for ProdlensMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "amazon-product-analysis-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Amazon product analysis. Call 'analyze-amazon-product' with a product URL \
                 (and optionally a ZIP code) to get a card, pricing with a deal rating, \
                 features, delivery, seller, review and specification sections."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodlens_extract::{BrightDataClient, ChatClient};

    fn server() -> ProdlensMcp {
        let chat = ChatClient::with_base_url("sk-test", "gpt-4o", 5, "http://127.0.0.1:9")
            .expect("chat client");
        let bd = BrightDataClient::with_base_url("bd-test", "gd_test", 5, "http://127.0.0.1:9")
            .expect("bright data client");
        ProdlensMcp::new(
            Arc::new(Extractor::new(chat, bd, 4)),
            "http://localhost:3000".to_string(),
        )
    }

    #[test]
    fn registers_both_tools() {
        let mut names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["analyze-amazon-product", "get-brand-info"]);
    }

    #[test]
    fn server_info_enables_tools() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "amazon-product-analysis-server");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn brand_info_has_expected_shape() {
        let info = brand_info();
        assert_eq!(info["name"], "mcp-use");
        assert_eq!(info["founded"], "2025");
        assert_eq!(info["values"].as_array().map(Vec::len), Some(5));
        assert_eq!(info["contact"]["github"], "https://github.com/mcp-use/mcp-use");
    }

    #[test]
    fn analyze_request_zipcode_is_optional() {
        let req: AnalyzeProductRequest =
            serde_json::from_value(json!({ "url": "https://www.amazon.com/dp/B0TEST" }))
                .expect("deserialize");
        assert_eq!(req.zipcode, None);
    }
}
