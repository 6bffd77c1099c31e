//! Display formatting for prices, counts, rankings and stock.

use serde::Serialize;

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("INR", "₹"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
];

/// `$1,299.99` for known currencies, `CAD 1,299.99` otherwise.
#[must_use]
pub fn format_price(amount: f64, currency: &str) -> String {
    let amount = format_amount(amount);
    match CURRENCY_SYMBOLS.iter().find(|(code, _)| *code == currency) {
        Some((_, symbol)) => format!("{symbol}{amount}"),
        None => format!("{currency} {amount}"),
    }
}

/// en-US style number: thousands separators, at most three fraction digits,
/// no trailing zeros.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if amount < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `950`, `12.3K`, `4.1M`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compact_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// `#42`, `#1.5K`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_rank(rank: u64) -> String {
    if rank >= 1_000 {
        format!("#{:.1}K", rank as f64 / 1_000.0)
    } else {
        format!("#{rank}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMedal {
    Gold,
    Silver,
    Bronze,
}

impl RankMedal {
    #[must_use]
    pub fn for_rank(rank: u64) -> Option<Self> {
        match rank {
            0 => None,
            1..=10 => Some(RankMedal::Gold),
            11..=50 => Some(RankMedal::Silver),
            51..=100 => Some(RankMedal::Bronze),
            _ => None,
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            RankMedal::Gold => "🏆",
            RankMedal::Silver => "🥈",
            RankMedal::Bronze => "🥉",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    InStock,
    LowStock,
    OutOfStock,
    Other,
}

/// Buckets the free-text availability line shown on the product page.
#[must_use]
pub fn availability_status(availability: &str) -> AvailabilityStatus {
    let lower = availability.to_lowercase();
    if lower.contains("in stock") {
        AvailabilityStatus::InStock
    } else if lower.contains("only") || lower.contains("few") {
        AvailabilityStatus::LowStock
    } else if lower.contains("out") || lower.contains("unavailable") {
        AvailabilityStatus::OutOfStock
    } else {
        AvailabilityStatus::Other
    }
}

/// Stock counts at or below this are shown as scarce.
pub const LOW_STOCK_LIMIT: u64 = 10;

/// `None` when there is nothing in stock to report.
#[must_use]
pub fn stock_line(quantity: u64) -> Option<String> {
    match quantity {
        0 => None,
        1..=LOW_STOCK_LIMIT => Some(format!("Only {quantity} left in stock")),
        _ => Some(format!("{quantity} in stock")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

/// Splits a 0-5 rating into full, half and empty stars.
#[must_use]
pub fn star_breakdown(rating: f64) -> StarBreakdown {
    let mut stars = StarBreakdown {
        full: 0,
        half: 0,
        empty: 0,
    };
    for i in 1..=5u8 {
        let i = f64::from(i);
        if rating >= i {
            stars.full += 1;
        } else if rating >= i - 0.5 {
            stars.half += 1;
        } else {
            stars.empty += 1;
        }
    }
    stars
}
