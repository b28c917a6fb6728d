use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest magnitude accepted for a price or amount, in dollars.
///
/// Keeps every sum of loaded amounts far inside `Decimal`'s range.
pub const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

fn in_range(value: &Decimal) -> bool {
    value.abs() <= Decimal::from(MAX_MAGNITUDE)
}

/// Decode a cash amount as exported by the broker.
///
/// Accepts a leading `$`, thousands separators and accounting negatives,
/// so `"($1,045.00)"` is `-1045.00`. Returns `None` if nothing numeric remains
/// or the value exceeds `MAX_MAGNITUDE`.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    let amount = match cleaned.strip_prefix('(').and_then(|c| c.strip_suffix(')')) {
        Some(inner) => Decimal::from_str(inner.trim()).ok().map(|d| -d),
        None => Decimal::from_str(cleaned).ok(),
    };
    amount.filter(in_range)
}

/// Decode a per-contract price. Prices are never negative.
pub fn parse_price(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    Decimal::from_str(cleaned.trim())
        .ok()
        .filter(|p| !p.is_sign_negative() || p.is_zero())
        .filter(in_range)
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `+12.50` / `-3.10` / `+0.00`
pub fn format_signed(value: Decimal) -> String {
    let rounded = round_half_up(value, 2);
    if rounded.is_zero() {
        return String::from("+0.00");
    }
    let sign = if rounded.is_sign_negative() { '-' } else { '+' };
    format!("{}{:.2}", sign, rounded.abs())
}

/// `$1.25`
pub fn format_price(value: Decimal) -> String {
    format!("${:.2}", round_half_up(value, 2))
}

/// Short currency form used in the daily summary: `+$1.52K`, `-$990`, `-$67.6`, `$0`.
pub fn format_compact(value: Decimal) -> String {
    let abs = value.abs();
    let trimmed = |v: Decimal, dp: u32| round_half_up(v, dp).normalize().to_string();

    let body = if abs >= Decimal::ONE_THOUSAND {
        let thousands = abs / Decimal::ONE_THOUSAND;
        let dp = if thousands >= Decimal::TEN { 0 } else { 2 };
        format!("${}K", trimmed(thousands, dp))
    } else if abs >= Decimal::ONE_HUNDRED {
        format!("${}", trimmed(abs, 0))
    } else if abs.is_zero() {
        String::from("$0")
    } else {
        format!("${}", trimmed(abs, 1))
    };

    if value.is_zero() {
        body
    } else if value.is_sign_negative() {
        format!("-{}", body)
    } else {
        format!("+{}", body)
    }
}
