#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;
use crate::engine::UtilizationRate;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative_remaining() {
    assert_eq!(format_amount(dec!(-5000)), "-$5,000.00");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_rounds_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(2.346)), "$2.35");
}

#[test]
fn test_format_amount_tiny_negative_is_not_signed() {
    assert_eq!(format_amount(dec!(-0.001)), "$0.00");
}

// ── format_rate ───────────────────────────────────────────────

#[test]
fn test_format_rate() {
    assert_eq!(format_rate(&UtilizationRate::Percent(dec!(107.6923))), "107.69%");
    assert_eq!(format_rate(&UtilizationRate::Unbounded), "unbounded");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Lisbon", 10), "Lisbon");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Customer Portal", 5), "Cust…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── usage_bar ─────────────────────────────────────────────────

#[test]
fn test_usage_bar_partial() {
    assert_eq!(usage_bar(&UtilizationRate::Percent(dec!(60)), 10), "[██████░░░░]");
}

#[test]
fn test_usage_bar_clamps() {
    assert_eq!(usage_bar(&UtilizationRate::Percent(dec!(150)), 4), "[████]");
    assert_eq!(usage_bar(&UtilizationRate::Percent(dec!(-20)), 4), "[░░░░]");
    assert_eq!(usage_bar(&UtilizationRate::Unbounded, 4), "[████]");
}

#[test]
fn test_usage_bar_rounds_down() {
    assert_eq!(usage_bar(&UtilizationRate::Percent(dec!(79.17)), 10), "[███████░░░]");
}
