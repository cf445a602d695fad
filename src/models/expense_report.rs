use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseCategory {
    Transport,
    Lodging,
    Meals,
    Equipment,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::Lodging => "Lodging",
            Self::Meals => "Meals",
            Self::Equipment => "Equipment",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "transport" | "travel" | "transportation" => Some(Self::Transport),
            "lodging" | "hotel" | "accommodation" => Some(Self::Lodging),
            "meals" | "food" | "per diem" => Some(Self::Meals),
            "equipment" | "supplies" => Some(Self::Equipment),
            "other" | "misc" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Transport,
            Self::Lodging,
            Self::Meals,
            Self::Equipment,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseReport {
    pub id: Option<i64>,
    pub mission_id: i64,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub description: String,
    pub submitted_on: NaiveDate,
    pub status: ExpenseStatus,
}

impl ExpenseReport {
    pub fn new(
        mission_id: i64,
        category: ExpenseCategory,
        amount: Decimal,
        submitted_on: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            mission_id,
            category,
            amount,
            description: String::new(),
            submitted_on,
            status: ExpenseStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ExpenseStatus::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.status == ExpenseStatus::Approved
    }
}
