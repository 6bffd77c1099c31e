//! Presentation model derived from an extracted record.
//!
//! [`ProductView::build`] turns a [`ProductAnalysisData`] into display-ready
//! sections. A section is `None` when the data it needs is missing, so
//! renderers never have to re-check the record.

use serde::Serialize;

use crate::deal::{categorize_deal, parse_discount_percent, DealInfo, DealInput};
use crate::format::{
    availability_status, compact_count, format_price, format_rank, star_breakdown, stock_line,
    AvailabilityStatus, RankMedal, StarBreakdown,
};
use crate::image_proxy::{proxied_image_url, proxied_image_urls};
use crate::specs::{collapse, normalize_specifications, MAX_COLLAPSED_SPECS};
use crate::text::{
    summarize_feature, truncate_at_word, Truncated, MAX_FEATURE_SUMMARY_CHARS, MAX_REVIEW_CHARS,
};
use crate::types::{DeliveryKind, ProductAnalysisData, SellerInfo, Specification};

/// Number of feature bullets shown.
pub const MAX_FEATURES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<GalleryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeaturesView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<ReviewsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<SpecsView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<RatingView>,
    /// Compact review count, e.g. `12.3K`.
    pub reviews: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingView {
    /// One decimal place.
    pub value: String,
    pub stars: StarBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub you_pay: String,
    /// Original price, shown struck through.
    pub was: Option<String>,
    pub discount_percent: f64,
    pub savings: Option<SavingsView>,
    pub deal: DealInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsView {
    pub amount: String,
    /// Width of the savings bar in percent, capped at 100.
    pub bar_width: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturesView {
    pub items: Vec<FeatureItem>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureItem {
    pub text: String,
    pub summary: Truncated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryView {
    pub options: Vec<DeliveryOptionView>,
    pub availability: Option<AvailabilityView>,
    pub stock: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOptionView {
    pub text: String,
    pub date: Option<String>,
    pub fast: bool,
    pub free: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityView {
    pub text: String,
    pub status: AvailabilityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerView {
    pub seller: Option<SellerInfo>,
    pub rankings: Vec<RankingView>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingView {
    pub category: String,
    pub rank: u64,
    pub label: String,
    pub medal: Option<RankMedal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsView {
    pub summary: Option<String>,
    pub top_review: Option<Truncated>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecsView {
    /// Normalized rows, key specs first.
    pub items: Vec<Specification>,
    /// How many of `items` are shown before expanding.
    pub collapsed_count: usize,
}

impl SpecsView {
    #[must_use]
    pub fn shown(&self) -> &[Specification] {
        collapse(&self.items, self.collapsed_count).0
    }

    #[must_use]
    pub fn hidden_count(&self) -> usize {
        collapse(&self.items, self.collapsed_count).1
    }
}

impl ProductView {
    /// Builds every section the record has data for. Image URLs are routed
    /// through the image proxy at `base_url` when one is given.
    #[must_use]
    pub fn build(data: &ProductAnalysisData, base_url: Option<&str>) -> Self {
        Self {
            card: card(data, base_url),
            gallery: gallery(data, base_url),
            pricing: pricing(data),
            features: features(data),
            delivery: delivery(data),
            seller: seller(data),
            reviews: reviews(data),
            specifications: specifications(data),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn card(data: &ProductAnalysisData, base_url: Option<&str>) -> Option<CardView> {
    let product = data.product.as_ref()?;
    if product.title.is_none()
        && product.image_url.is_none()
        && product.price.is_none()
        && product.rating.is_none()
    {
        return None;
    }

    let price = match (product.price, product.currency.as_deref()) {
        (Some(amount), Some(currency)) => Some(format_price(amount, currency)),
        _ => None,
    };

    Some(CardView {
        title: product.title.clone(),
        brand: product.brand.clone(),
        image_url: proxied_image_url(product.image_url.as_deref(), base_url),
        price,
        rating: product.rating.map(|rating| RatingView {
            value: format!("{rating:.1}"),
            stars: star_breakdown(rating),
        }),
        reviews: product.total_reviews.map(compact_count),
    })
}

fn gallery(data: &ProductAnalysisData, base_url: Option<&str>) -> Option<GalleryView> {
    let images = data.images.as_deref().filter(|images| images.len() > 1)?;
    Some(GalleryView {
        images: proxied_image_urls(images, base_url),
    })
}

fn pricing(data: &ProductAnalysisData) -> Option<PricingView> {
    let pricing = data.pricing.as_ref()?;
    let final_price = pricing.final_price?;
    let currency = pricing.currency.as_deref()?;

    let initial_price = pricing.initial_price.unwrap_or(final_price);
    let savings = pricing.savings.unwrap_or(0.0);
    let discount_percent = parse_discount_percent(pricing.discount.as_deref().unwrap_or("0%"));

    #[allow(clippy::float_cmp)]
    let was = (initial_price != final_price && initial_price > 0.0)
        .then(|| format_price(initial_price, currency));

    let savings_view = (discount_percent > 0.0 && savings > 0.0).then(|| SavingsView {
        amount: format_price(savings, currency),
        bar_width: (discount_percent * 2.0).min(100.0),
    });

    let deal = categorize_deal(&DealInput {
        discount_percent,
        savings,
        initial_price,
        currency: currency.to_string(),
    });

    Some(PricingView {
        you_pay: format_price(final_price, currency),
        was,
        discount_percent,
        savings: savings_view,
        deal,
    })
}

fn features(data: &ProductAnalysisData) -> Option<FeaturesView> {
    let features = data.features.as_deref().filter(|f| !f.is_empty())?;
    Some(FeaturesView {
        items: features
            .iter()
            .take(MAX_FEATURES)
            .map(|text| FeatureItem {
                text: text.clone(),
                summary: summarize_feature(text, MAX_FEATURE_SUMMARY_CHARS),
            })
            .collect(),
        total: features.len(),
    })
}

fn delivery(data: &ProductAnalysisData) -> Option<DeliveryView> {
    let options = data.delivery.as_deref().filter(|d| !d.is_empty())?;
    let availability = data
        .product
        .as_ref()
        .and_then(|p| p.availability.as_deref())
        .map(|text| AvailabilityView {
            text: text.to_string(),
            status: availability_status(text),
        });

    Some(DeliveryView {
        options: options
            .iter()
            .map(|option| DeliveryOptionView {
                text: option.text.clone(),
                date: option.date.clone(),
                fast: option.kind == DeliveryKind::Fast,
                free: option.kind == DeliveryKind::Standard
                    && option.text.to_lowercase().contains("free"),
            })
            .collect(),
        availability,
        stock: data.stock_quantity.and_then(stock_line),
    })
}

fn seller(data: &ProductAnalysisData) -> Option<SellerView> {
    let rankings = data.rankings.as_deref().unwrap_or_default();
    let categories = data.categories.as_deref().unwrap_or_default();
    if data.seller.is_none() && rankings.is_empty() && categories.is_empty() {
        return None;
    }

    Some(SellerView {
        seller: data.seller.clone(),
        rankings: rankings
            .iter()
            .map(|r| RankingView {
                category: r.category.clone(),
                rank: r.rank,
                label: format_rank(r.rank),
                medal: RankMedal::for_rank(r.rank),
            })
            .collect(),
        categories: categories.to_vec(),
    })
}

fn reviews(data: &ProductAnalysisData) -> Option<ReviewsView> {
    let review = data.customer_review.as_ref()?;
    if review.summary.is_none() && review.top_review.is_none() {
        return None;
    }
    Some(ReviewsView {
        summary: review.summary.clone(),
        top_review: review
            .top_review
            .as_deref()
            .map(|text| truncate_at_word(text, MAX_REVIEW_CHARS)),
    })
}

fn specifications(data: &ProductAnalysisData) -> Option<SpecsView> {
    let specs = data.specifications.as_deref().filter(|s| !s.is_empty())?;
    let items = normalize_specifications(specs);
    let collapsed_count = collapse(&items, MAX_COLLAPSED_SPECS).0.len();
    Some(SpecsView {
        items,
        collapsed_count,
    })
}

#[cfg(test)]
#[path = "present_test.rs"]
mod tests;
