//! Deal-quality classification for a price reduction.
//!
//! Combines the relative discount with the absolute savings so that a modest
//! percentage off an expensive item can still rank well, and a large
//! percentage off a cheap item is not over-rated.

use serde::Serialize;

/// Absolute savings considered "significant" per currency.
///
/// Currencies not listed fall back to [`DEFAULT_SIGNIFICANT_THRESHOLD`].
pub const SIGNIFICANT_SAVINGS_THRESHOLDS: &[(&str, f64)] = &[
    ("USD", 50.0),
    ("INR", 2000.0),
    ("EUR", 45.0),
    ("GBP", 40.0),
    ("JPY", 5000.0),
];

pub const DEFAULT_SIGNIFICANT_THRESHOLD: f64 = 50.0;

/// Cap on `savings / threshold` before it is scaled into the bonus.
const MAX_SAVINGS_RATIO: f64 = 2.0;
const BONUS_PER_RATIO: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DealTier {
    Hot,
    Great,
    Good,
    Fair,
    Minimal,
    None,
}

impl DealTier {
    /// Headline shown next to the price.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DealTier::Hot => "🔥 Hot Deal!",
            DealTier::Great => "Great Deal!",
            DealTier::Good => "Good Deal",
            DealTier::Fair => "Fair Price",
            DealTier::Minimal => "Minimal Savings",
            DealTier::None => "Regular Price",
        }
    }

    /// Text printed on the corner ribbon. Empty for tiers without a ribbon text.
    #[must_use]
    pub fn ribbon_text(self) -> &'static str {
        match self {
            DealTier::Hot => "HOT DEAL",
            DealTier::Great => "GREAT DEAL",
            DealTier::Good => "GOOD DEAL",
            DealTier::Fair => "SAVE",
            DealTier::Minimal | DealTier::None => "",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            DealTier::Hot => "Exceptional savings - this is a steal!",
            DealTier::Great => "Excellent price - worth grabbing!",
            DealTier::Good => "Decent savings on this item",
            DealTier::Fair => "Small savings available",
            DealTier::Minimal => "Minor price reduction",
            DealTier::None => "No discount currently available",
        }
    }

    /// Only real deals get the ribbon badge.
    #[must_use]
    pub fn shows_ribbon(self) -> bool {
        matches!(self, DealTier::Hot | DealTier::Great | DealTier::Good)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DealTier::Hot => "hot",
            DealTier::Great => "great",
            DealTier::Good => "good",
            DealTier::Fair => "fair",
            DealTier::Minimal => "minimal",
            DealTier::None => "none",
        }
    }
}

impl std::fmt::Display for DealTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numbers the categorizer works from.
#[derive(Debug, Clone, PartialEq)]
pub struct DealInput {
    /// Percentage off, `0` meaning no discount.
    pub discount_percent: f64,
    /// Absolute amount saved, in `currency`.
    pub savings: f64,
    /// Informational; not used for scoring.
    pub initial_price: f64,
    pub currency: String,
}

/// Tier plus the display metadata that goes with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealInfo {
    pub tier: DealTier,
    pub label: &'static str,
    pub ribbon_text: &'static str,
    pub description: &'static str,
    pub show_ribbon: bool,
    pub deal_score: f64,
}

impl DealInfo {
    fn for_tier(tier: DealTier, deal_score: f64) -> Self {
        Self {
            tier,
            label: tier.label(),
            ribbon_text: tier.ribbon_text(),
            description: tier.description(),
            show_ribbon: tier.shows_ribbon(),
            deal_score,
        }
    }
}

/// Looks up the significant-savings threshold for an ISO-ish currency code.
#[must_use]
pub fn significant_threshold(currency: &str) -> f64 {
    SIGNIFICANT_SAVINGS_THRESHOLDS
        .iter()
        .find(|(code, _)| *code == currency)
        .map_or(DEFAULT_SIGNIFICANT_THRESHOLD, |(_, threshold)| *threshold)
}

/// Classifies a deal. First matching rule wins, from `hot` down to `none`.
///
/// Negative and NaN amounts are clamped to zero before scoring.
#[must_use]
pub fn categorize_deal(input: &DealInput) -> DealInfo {
    let discount = clamp_non_negative(input.discount_percent);
    let savings = clamp_non_negative(input.savings);
    let threshold = significant_threshold(&input.currency);

    let bonus = (savings / threshold).min(MAX_SAVINGS_RATIO) * BONUS_PER_RATIO;
    let deal_score = discount + bonus;

    let tier = if discount >= 50.0 || (discount >= 40.0 && savings >= threshold * 2.0) {
        DealTier::Hot
    } else if discount >= 30.0 || (discount >= 20.0 && savings >= threshold * 1.5) {
        DealTier::Great
    } else if discount >= 15.0 || (discount >= 10.0 && savings >= threshold) {
        DealTier::Good
    } else if discount >= 5.0 || deal_score >= 8.0 {
        DealTier::Fair
    } else if discount >= 1.0 {
        DealTier::Minimal
    } else {
        DealTier::None
    };

    DealInfo::for_tier(tier, deal_score)
}

/// Extracts the magnitude of a displayed discount such as `"-19%"`.
///
/// Keeps digits, `.` and `-`, parses the longest numeric prefix and returns
/// its absolute value. Anything unparseable yields `0.0`.
#[must_use]
pub fn parse_discount_percent(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    (1..=cleaned.len())
        .rev()
        .find_map(|end| cleaned[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map_or(0.0, f64::abs)
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
