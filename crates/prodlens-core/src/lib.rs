//! Domain model and bespoke logic for Amazon product analysis.
//!
//! Holds the extracted [`ProductAnalysisData`] record, the deal categorizer,
//! the Amazon CDN image proxy rule, the specification normalizer and the
//! presentation model built from a record. No I/O happens here apart from
//! reading configuration from the environment.

pub mod app_config;
pub mod config;
pub mod deal;
pub mod error;
pub mod format;
pub mod image_proxy;
pub mod present;
pub mod specs;
pub mod text;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use deal::{categorize_deal, parse_discount_percent, DealInfo, DealInput, DealTier};
pub use error::ConfigError;
pub use image_proxy::{is_allowed_image_url, proxied_image_url, IMAGE_PROXY_PATH};
pub use present::ProductView;
pub use specs::normalize_specifications;
pub use types::{
    AnalyzeRequest, CustomerReview, DeliveryKind, DeliveryOption, Pricing, ProductAnalysisData,
    ProductSummary, Ranking, SchemaViolation, SellerInfo, Specification,
};
