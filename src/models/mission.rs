use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl MissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A trip charged to a project. Its budget is the estimated cost.
#[derive(Debug, Clone)]
pub struct Mission {
    pub id: Option<i64>,
    pub project_id: i64,
    pub destination: String,
    pub purpose: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_cost: Decimal,
    pub status: MissionStatus,
}

impl Mission {
    pub fn new(
        project_id: i64,
        destination: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        estimated_cost: Decimal,
    ) -> Self {
        Self {
            id: None,
            project_id,
            destination,
            purpose: String::new(),
            start_date,
            end_date,
            estimated_cost,
            status: MissionStatus::Planned,
        }
    }
}

impl std::fmt::Display for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.destination)
    }
}
