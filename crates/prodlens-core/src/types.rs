//! The structured record extracted for one Amazon product page.
//!
//! Every field is optional: the extraction is best-effort and a record with
//! most fields missing is a normal result, not an error. Consumers omit the
//! sections whose data is absent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input of one analysis: the product page and an optional delivery ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeRequest {
    /// Amazon product URL (must contain /dp/ or /gp/product/)
    pub url: String,
    /// Optional ZIP code for location-specific pricing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysisData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// All product image URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Vec<Specification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Vec<DeliveryOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_review: Option<CustomerReview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rankings: Option<Vec<Ranking>>,
    /// Category breadcrumb, root first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Average star rating between 0 and 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    /// Discount as displayed on the page, e.g. `"-19%"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// One labelled specification row, e.g. `Brand` / `Acme`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Specification {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Specification {
    #[must_use]
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    Standard,
    Fast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeliveryOption {
    #[serde(rename = "type")]
    pub kind: DeliveryKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ships_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_review: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Ranking {
    pub category: String,
    /// Best-seller rank, 1 is the top.
    pub rank: u64,
}

/// A schema constraint the record does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub field: String,
    pub reason: String,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for SchemaViolation {}

impl ProductAnalysisData {
    /// Checks the constraints serde cannot express on its own.
    ///
    /// Missing fields are never a violation; only present values are checked.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaViolation`] found, in field order.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if let Some(product) = &self.product {
            if let Some(rating) = product.rating {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(violation("product.rating", format!("{rating} is outside 0..=5")));
                }
            }
            if let Some(price) = product.price {
                check_finite("product.price", price)?;
            }
            if let Some(image_url) = &product.image_url {
                check_url("product.imageUrl", image_url)?;
            }
        }

        if let Some(pricing) = &self.pricing {
            for (field, value) in [
                ("pricing.initialPrice", pricing.initial_price),
                ("pricing.finalPrice", pricing.final_price),
                ("pricing.savings", pricing.savings),
            ] {
                if let Some(value) = value {
                    check_finite(field, value)?;
                }
            }
        }

        for (i, image) in self.images.iter().flatten().enumerate() {
            check_url(&format!("images[{i}]"), image)?;
        }

        for (i, ranking) in self.rankings.iter().flatten().enumerate() {
            if ranking.rank == 0 {
                return Err(violation(
                    &format!("rankings[{i}].rank"),
                    "rank must be a positive integer".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn violation(field: &str, reason: String) -> SchemaViolation {
    SchemaViolation {
        field: field.to_string(),
        reason,
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), SchemaViolation> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(violation(field, format!("{value} is not a finite number")))
    }
}

fn check_url(field: &str, raw: &str) -> Result<(), SchemaViolation> {
    url::Url::parse(raw)
        .map(|_| ())
        .map_err(|e| violation(field, format!("'{raw}' is not a valid URL: {e}")))
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
