use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Planned,
    Active,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Active => "Active",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: Option<i64>,
    pub department_id: i64,
    pub code: String,
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
}

impl Project {
    pub fn new(
        department_id: i64,
        code: String,
        name: String,
        allocated: Decimal,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            department_id,
            code,
            name,
            allocated,
            spent: Decimal::ZERO,
            start_date,
            end_date: None,
            status: ProjectStatus::Planned,
        }
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::new(self.allocated, self.spent)
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
