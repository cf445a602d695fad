use rust_decimal::Decimal;

use crate::engine::{compute_utilization, Thresholds, Utilization};
use crate::error::BudgetError;

/// An allocation and what has been charged against it. Nothing derived is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Envelope {
    pub allocated: Decimal,
    pub spent: Decimal,
}

impl Envelope {
    pub fn new(allocated: Decimal, spent: Decimal) -> Self {
        Self { allocated, spent }
    }

    pub fn utilization(&self, thresholds: &Thresholds) -> Result<Utilization, BudgetError> {
        compute_utilization(self.allocated, self.spent, thresholds)
    }

    /// Combine two envelopes. Returns `None` if either sum leaves the `Decimal` range.
    pub fn checked_add(&self, other: &Envelope) -> Option<Envelope> {
        Some(Envelope {
            allocated: self.allocated.checked_add(other.allocated)?,
            spent: self.spent.checked_add(other.spent)?,
        })
    }
}
