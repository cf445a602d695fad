//! Budget envelopes for departments, projects and missions: utilization rate,
//! remaining amount and a status band derived from configurable thresholds.

pub mod alerts;
pub mod config;
pub mod engine;
pub mod error;
pub mod import;
pub mod ledger;
pub mod models;
pub mod report;

pub use engine::{
    compute_utilization, compute_utilization_f64, BudgetStatusEngine, FloatUtilization, Status,
    Thresholds, Utilization, UtilizationRate,
};
pub use error::{BudgetError, InvalidReason};
