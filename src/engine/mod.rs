//! Budget utilization and status derivation.
//!
//! Everything here is a pure function of `(allocated, spent)` and the
//! [`Thresholds`] in effect. Nothing is cached and nothing is logged.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::{BudgetError, InvalidReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    WithinLimit,
    ApproachingLimit,
    OverBudget,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithinLimit => "within-limit",
            Self::ApproachingLimit => "approaching-limit",
            Self::OverBudget => "over-budget",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "within-limit" | "within" | "ok" => Some(Self::WithinLimit),
            "approaching-limit" | "approaching" | "warning" => Some(Self::ApproachingLimit),
            "over-budget" | "over" | "exceeded" => Some(Self::OverBudget),
            _ => None,
        }
    }

    pub fn all() -> &'static [Status] {
        &[Self::WithinLimit, Self::ApproachingLimit, Self::OverBudget]
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Utilization as a percentage of the allocation.
///
/// `Unbounded` is the sentinel for money spent against a zero allocation, and
/// for ratios too large for `Decimal`. It compares above every threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationRate {
    Percent(Decimal),
    Unbounded,
}

impl UtilizationRate {
    pub fn percent(&self) -> Option<Decimal> {
        match self {
            Self::Percent(p) => Some(*p),
            Self::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// True when the rate has reached `threshold` (inclusive).
    pub fn reaches(&self, threshold: Decimal) -> bool {
        match self {
            Self::Percent(p) => *p >= threshold,
            Self::Unbounded => true,
        }
    }
}

impl std::fmt::Display for UtilizationRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{:.2}%", p.round_dp(2)),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Two ordered cut-offs, in percent of the allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    approaching: Decimal,
    over: Decimal,
}

impl Thresholds {
    pub const DEFAULT_APPROACHING: i64 = 80;
    pub const DEFAULT_OVER: i64 = 100;

    pub fn new(approaching: Decimal, over: Decimal) -> Result<Self, BudgetError> {
        if approaching < Decimal::ZERO || approaching > over {
            return Err(BudgetError::InvalidThresholds { approaching, over });
        }
        Ok(Self { approaching, over })
    }

    pub fn from_f64(approaching: f64, over: f64) -> Result<Self, BudgetError> {
        let approaching = to_decimal("approaching", approaching)?;
        let over = to_decimal("over", over)?;
        Self::new(approaching, over)
    }

    pub fn approaching(&self) -> Decimal {
        self.approaching
    }

    pub fn over(&self) -> Decimal {
        self.over
    }

    pub fn classify(&self, rate: UtilizationRate) -> Status {
        if rate.reaches(self.over) {
            Status::OverBudget
        } else if rate.reaches(self.approaching) {
            Status::ApproachingLimit
        } else {
            Status::WithinLimit
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            approaching: Decimal::from(Self::DEFAULT_APPROACHING),
            over: Decimal::from(Self::DEFAULT_OVER),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utilization {
    /// `allocated - spent`; negative when overspent.
    pub remaining: Decimal,
    pub rate: UtilizationRate,
    pub status: Status,
}

impl Utilization {
    pub fn is_overspent(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

/// Derive remaining amount, utilization rate and status for one envelope.
///
/// With `allocated == 0` the rate is `0%` when nothing (or a net credit) was
/// spent and [`UtilizationRate::Unbounded`] otherwise. Negative inputs are not
/// rejected; the arithmetic result is passed through.
pub fn compute_utilization(
    allocated: Decimal,
    spent: Decimal,
    thresholds: &Thresholds,
) -> Result<Utilization, BudgetError> {
    let remaining = allocated
        .checked_sub(spent)
        .ok_or_else(|| BudgetError::invalid("spent", InvalidReason::OutOfRange))?;
    let rate = utilization_rate(allocated, spent);
    Ok(Utilization {
        remaining,
        rate,
        status: thresholds.classify(rate),
    })
}

/// Result of the float entry point. `remaining` stays an `f64` so finite
/// inputs beyond the `Decimal` range still produce a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatUtilization {
    pub remaining: f64,
    pub rate: UtilizationRate,
    pub status: Status,
}

impl FloatUtilization {
    pub fn is_overspent(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Float entry point. NaN and infinities are rejected; every finite input
/// gets a result.
///
/// The ratio is taken in `f64` so that tiny allocations are not collapsed to
/// zero and huge ones are not refused. Only the percentage is converted to
/// `Decimal`, saturating like [`compute_utilization`].
pub fn compute_utilization_f64(
    allocated: f64,
    spent: f64,
    thresholds: &Thresholds,
) -> Result<FloatUtilization, BudgetError> {
    check_finite("allocated", allocated)?;
    check_finite("spent", spent)?;

    let remaining = allocated - spent;
    if !remaining.is_finite() {
        return Err(BudgetError::invalid("spent", InvalidReason::OutOfRange));
    }
    let rate = float_utilization_rate(allocated, spent);
    Ok(FloatUtilization {
        remaining,
        rate,
        status: thresholds.classify(rate),
    })
}

fn float_utilization_rate(allocated: f64, spent: f64) -> UtilizationRate {
    if allocated == 0.0 {
        return if spent > 0.0 {
            UtilizationRate::Unbounded
        } else {
            UtilizationRate::Percent(Decimal::ZERO)
        };
    }

    let percent = spent / allocated * 100.0;
    match Decimal::from_f64(percent) {
        Some(p) if percent.is_finite() => UtilizationRate::Percent(p),
        _ if percent > 0.0 => UtilizationRate::Unbounded,
        _ => UtilizationRate::Percent(Decimal::MIN),
    }
}

fn utilization_rate(allocated: Decimal, spent: Decimal) -> UtilizationRate {
    if allocated.is_zero() {
        return if spent > Decimal::ZERO {
            UtilizationRate::Unbounded
        } else {
            UtilizationRate::Percent(Decimal::ZERO)
        };
    }

    match spent
        .checked_div(allocated)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(p) => UtilizationRate::Percent(p),
        // Only reachable when |spent / allocated| exceeds the Decimal range.
        None if spent.is_sign_negative() == allocated.is_sign_negative() => {
            UtilizationRate::Unbounded
        }
        None => UtilizationRate::Percent(Decimal::MIN),
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), BudgetError> {
    if value.is_nan() {
        return Err(BudgetError::invalid(field, InvalidReason::NotANumber));
    }
    if !value.is_finite() {
        return Err(BudgetError::invalid(field, InvalidReason::NotFinite));
    }
    Ok(())
}

fn to_decimal(field: &'static str, value: f64) -> Result<Decimal, BudgetError> {
    check_finite(field, value)?;
    Decimal::from_f64(value).ok_or_else(|| BudgetError::invalid(field, InvalidReason::OutOfRange))
}

/// Holds a set of thresholds so call sites don't thread them through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetStatusEngine {
    thresholds: Thresholds,
}

impl BudgetStatusEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn compute(&self, allocated: Decimal, spent: Decimal) -> Result<Utilization, BudgetError> {
        compute_utilization(allocated, spent, &self.thresholds)
    }

    pub fn compute_f64(&self, allocated: f64, spent: f64) -> Result<FloatUtilization, BudgetError> {
        compute_utilization_f64(allocated, spent, &self.thresholds)
    }
}
