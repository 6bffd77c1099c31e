//! Plain-text rendering of a [`ProductView`] for the terminal.

use prodlens_core::format::{format_amount, RankMedal, StarBreakdown};
use prodlens_core::present::{
    CardView, DeliveryView, FeaturesView, PricingView, ReviewsView, SellerView, SpecsView,
};
use prodlens_core::{DealInfo, ProductView};

const BAR_CELLS: usize = 20;

pub(crate) fn render(view: &ProductView) -> String {
    let mut sections: Vec<Vec<String>> = Vec::new();

    if let Some(card) = &view.card {
        sections.push(card_lines(card));
    }
    if let Some(gallery) = &view.gallery {
        let mut lines = vec![format!("Images ({})", gallery.images.len())];
        lines.extend(gallery.images.iter().map(|img| format!("  {img}")));
        sections.push(lines);
    }
    if let Some(pricing) = &view.pricing {
        sections.push(pricing_lines(pricing));
    }
    if let Some(features) = &view.features {
        sections.push(feature_lines(features));
    }
    if let Some(delivery) = &view.delivery {
        sections.push(delivery_lines(delivery));
    }
    if let Some(seller) = &view.seller {
        sections.push(seller_lines(seller));
    }
    if let Some(reviews) = &view.reviews {
        sections.push(review_lines(reviews));
    }
    if let Some(specs) = &view.specifications {
        sections.push(spec_lines(specs));
    }

    sections
        .into_iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `GREAT DEAL | Great Deal! Excellent price - worth grabbing!`
pub(crate) fn deal_line(info: &DealInfo) -> String {
    if info.show_ribbon {
        format!("{} | {} {}", info.ribbon_text, info.label, info.description)
    } else {
        format!("{} {}", info.label, info.description)
    }
}

fn stars(breakdown: StarBreakdown) -> String {
    let mut out = String::new();
    out.push_str(&"★".repeat(usize::from(breakdown.full)));
    out.push_str(&"⯨".repeat(usize::from(breakdown.half)));
    out.push_str(&"☆".repeat(usize::from(breakdown.empty)));
    out
}

fn card_lines(card: &CardView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = &card.title {
        lines.push(title.clone());
    }
    if let Some(brand) = &card.brand {
        lines.push(format!("by {brand}"));
    }
    if let Some(price) = &card.price {
        lines.push(price.clone());
    }
    if let Some(rating) = &card.rating {
        let mut line = format!("{} {}", stars(rating.stars), rating.value);
        if let Some(reviews) = &card.reviews {
            line.push_str(&format!(" ({reviews} reviews)"));
        }
        lines.push(line);
    }
    if let Some(image) = &card.image_url {
        lines.push(image.clone());
    }
    lines
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn savings_bar(width_percent: f64) -> String {
    let filled = ((width_percent.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn pricing_lines(pricing: &PricingView) -> Vec<String> {
    let mut lines = vec![format!("You pay: {}", pricing.you_pay)];
    if let Some(was) = &pricing.was {
        lines.push(format!("Was: {was}"));
    }
    if let Some(savings) = &pricing.savings {
        lines.push(format!(
            "Save {} ({}%) {}",
            savings.amount,
            format_amount(pricing.discount_percent),
            savings_bar(savings.bar_width)
        ));
    }
    lines.push(deal_line(&pricing.deal));
    lines
}

fn feature_lines(features: &FeaturesView) -> Vec<String> {
    let mut lines = vec!["Features".to_string()];
    lines.extend(
        features
            .items
            .iter()
            .map(|item| format!("  - {}", item.summary.text)),
    );
    let hidden = features.total - features.items.len();
    if hidden > 0 {
        lines.push(format!("  (+{hidden} more)"));
    }
    lines
}

fn delivery_lines(delivery: &DeliveryView) -> Vec<String> {
    let mut lines = vec!["Delivery".to_string()];
    for option in &delivery.options {
        let mut line = String::from("  ");
        if option.fast {
            line.push_str("[FAST] ");
        }
        if option.free {
            line.push_str("[FREE] ");
        }
        line.push_str(&option.text);
        if let Some(date) = &option.date {
            line.push_str(&format!(" ({date})"));
        }
        lines.push(line);
    }
    if let Some(availability) = &delivery.availability {
        lines.push(format!("  {}", availability.text));
    }
    if let Some(stock) = &delivery.stock {
        lines.push(format!("  {stock}"));
    }
    lines
}

fn seller_lines(seller: &SellerView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(info) = &seller.seller {
        lines.push(format!("Sold by {}", info.sold_by.as_deref().unwrap_or(&info.name)));
        if let Some(ships_from) = &info.ships_from {
            lines.push(format!("Ships from {ships_from}"));
        }
    }
    for ranking in &seller.rankings {
        let medal = ranking.medal.map_or("", RankMedal::emoji);
        lines.push(
            format!("{medal} {} in {}", ranking.label, ranking.category)
                .trim_start()
                .to_string(),
        );
    }
    if !seller.categories.is_empty() {
        lines.push(seller.categories.join(" > "));
    }
    lines
}

fn review_lines(reviews: &ReviewsView) -> Vec<String> {
    let mut lines = vec!["Reviews".to_string()];
    if let Some(summary) = &reviews.summary {
        lines.push(format!("  {summary}"));
    }
    if let Some(top) = &reviews.top_review {
        lines.push(format!("  \"{}\"", top.text));
    }
    lines
}

fn spec_lines(specs: &SpecsView) -> Vec<String> {
    let mut lines = vec!["Specifications".to_string()];
    lines.extend(
        specs
            .shown()
            .iter()
            .map(|spec| format!("  {}: {}", spec.kind, spec.value)),
    );
    if specs.hidden_count() > 0 {
        lines.push(format!("  (+{} more)", specs.hidden_count()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodlens_core::{
        categorize_deal, DealInput, Pricing, ProductAnalysisData, ProductSummary, Ranking,
        SellerInfo, Specification,
    };

    #[test]
    fn empty_view_renders_nothing() {
        assert_eq!(render(&ProductView::default()), "");
    }

    #[test]
    fn renders_card_and_pricing() {
        let data = ProductAnalysisData {
            product: Some(ProductSummary {
                title: Some("Acme Kettle".to_string()),
                rating: Some(4.5),
                total_reviews: Some(2_500),
                ..ProductSummary::default()
            }),
            pricing: Some(Pricing {
                initial_price: Some(100.0),
                final_price: Some(60.0),
                discount: Some("-40%".to_string()),
                savings: Some(40.0),
                currency: Some("USD".to_string()),
            }),
            ..ProductAnalysisData::default()
        };
        let out = render(&ProductView::build(&data, None));
        assert!(out.starts_with("Acme Kettle\n★★★★⯨ 4.5 (2.5K reviews)"), "{out}");
        assert!(out.contains("You pay: $60"));
        assert!(out.contains("Was: $100"));
        assert!(out.contains("Save $40 (40%) [################....]"), "{out}");
        assert!(out.contains("GREAT DEAL | Great Deal!"));
    }

    #[test]
    fn renders_rankings_with_medals_and_hidden_spec_count() {
        let data = ProductAnalysisData {
            seller: Some(SellerInfo {
                name: "Acme Store".to_string(),
                ships_from: None,
                sold_by: None,
            }),
            rankings: Some(vec![Ranking {
                category: "Kitchen".to_string(),
                rank: 3,
            }]),
            specifications: Some(
                (0..8)
                    .map(|i| Specification::new(format!("Key {i}"), "v"))
                    .collect(),
            ),
            ..ProductAnalysisData::default()
        };
        let out = render(&ProductView::build(&data, None));
        assert!(out.contains("Sold by Acme Store"));
        assert!(out.contains("🏆 #3 in Kitchen"));
        assert!(out.contains("  (+2 more)"));
    }

    #[test]
    fn deal_line_omits_ribbon_for_fair_prices() {
        let info = categorize_deal(&DealInput {
            discount_percent: 6.0,
            savings: 3.0,
            initial_price: 50.0,
            currency: "USD".to_string(),
        });
        assert_eq!(deal_line(&info), "Fair Price Small savings available");
    }

    #[test]
    fn savings_bar_is_clamped() {
        assert_eq!(savings_bar(250.0), format!("[{}]", "#".repeat(BAR_CELLS)));
        assert_eq!(savings_bar(0.0), format!("[{}]", ".".repeat(BAR_CELLS)));
    }
}
