//! Display helpers for dashboard-style figures. The engine returns raw f64;
//! these render them the way the front end shows them.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const NOT_AVAILABLE: &str = "N/A";

fn round_2dp(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// US-dollar amount with two decimals and thousands separators,
/// e.g. `-$1,234.56`.
pub fn format_currency(value: f64) -> String {
    let Some(rounded) = round_2dp(value) else {
        return NOT_AVAILABLE.to_string();
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{frac}", group_thousands(whole))
}

/// Percentage with two decimals, e.g. `72.60%`. The input is already in
/// percent.
pub fn format_percent(value: f64) -> String {
    match round_2dp(value) {
        Some(rounded) => format!("{rounded:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}
