use rust_decimal::Decimal;
use thiserror::Error;

/// Why an input to the engine was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NotANumber,
    NotFinite,
    OutOfRange,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotANumber => "not a number",
            Self::NotFinite => "not finite",
            Self::OutOfRange => "out of range",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        field: &'static str,
        reason: InvalidReason,
    },

    #[error("Invalid thresholds: approaching {approaching}% must be >= 0 and <= over {over}%")]
    InvalidThresholds { approaching: Decimal, over: Decimal },
}

impl BudgetError {
    pub(crate) fn invalid(field: &'static str, reason: InvalidReason) -> Self {
        Self::InvalidInput { field, reason }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
