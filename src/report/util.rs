use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::engine::UtilizationRate;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `-5000` → `"-$5,000.00"`
pub fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO && !abs.is_zero() {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// `79.17%`, or `unbounded` for spending against a zero allocation.
pub fn format_rate(rate: &UtilizationRate) -> String {
    rate.to_string()
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// A fixed-width usage bar, clamped to full.
pub(crate) fn usage_bar(rate: &UtilizationRate, width: usize) -> String {
    let filled = match rate.percent() {
        Some(p) if p <= Decimal::ZERO => 0,
        Some(p) if p >= Decimal::ONE_HUNDRED => width,
        Some(p) => {
            let cells = p * Decimal::from(width as u64) / Decimal::ONE_HUNDRED;
            cells.trunc().to_usize().unwrap_or(width)
        }
        None => width,
    };
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
