//! Budget notifications: envelopes nearing or past their limit, and expense
//! reports waiting for a decision.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::engine::{BudgetStatusEngine, Status};
use crate::ledger::Ledger;
use crate::report::{build_rows, format_amount, format_rate, ReportRow, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Critical => "CRIT",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: AlertLevel,
    pub subject: String,
    pub message: String,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// One notification per row that is not within its limit.
pub fn notifications_for_rows(rows: &[ReportRow]) -> Vec<Notification> {
    rows.iter().filter_map(row_notification).collect()
}

fn row_notification(row: &ReportRow) -> Option<Notification> {
    let u = &row.utilization;
    let subject = format!("{} '{}'", row.scope.noun(), row.name);
    let (level, message) = match u.status {
        Status::WithinLimit => return None,
        Status::ApproachingLimit => (
            AlertLevel::Warning,
            format!(
                "{subject} has used {} of its budget ({} left)",
                format_rate(&u.rate),
                format_amount(u.remaining)
            ),
        ),
        Status::OverBudget if u.rate.is_unbounded() && row.envelope.allocated.is_zero() => (
            AlertLevel::Critical,
            format!(
                "{subject} has spent {} with no budget allocated",
                format_amount(row.envelope.spent)
            ),
        ),
        Status::OverBudget if u.remaining < Decimal::ZERO => (
            AlertLevel::Critical,
            format!(
                "{subject} is over budget by {}",
                format_amount(u.remaining.abs())
            ),
        ),
        Status::OverBudget => (
            AlertLevel::Critical,
            format!("{subject} has used {} of its budget", format_rate(&u.rate)),
        ),
    };
    Some(Notification {
        level,
        subject,
        message,
    })
}

/// Notifications for every ledger scope plus pending expense reports,
/// most severe first.
pub fn notifications_for_ledger(
    ledger: &Ledger,
    engine: &BudgetStatusEngine,
) -> Result<Vec<Notification>> {
    let mut notifications = Vec::new();
    for scope in Scope::all() {
        let rows = build_rows(ledger, *scope, engine)?;
        notifications.extend(notifications_for_rows(&rows));
    }

    for report in ledger.get_pending_expense_reports() {
        let destination = ledger
            .get_mission(report.mission_id)
            .map(|m| m.destination.as_str())
            .unwrap_or("unknown mission");
        let subject = format!("Expense report #{}", report.id.unwrap_or(0));
        let message = format!(
            "{subject}: {} expense of {} for {destination} awaiting approval",
            report.category,
            format_amount(report.amount)
        );
        notifications.push(Notification {
            level: AlertLevel::Info,
            subject,
            message,
        });
    }

    notifications.sort_by(|a, b| b.level.cmp(&a.level));
    Ok(notifications)
}
