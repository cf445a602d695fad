use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Department {
    pub id: Option<i64>,
    /// Short code, e.g. "ENG"
    pub code: String,
    pub name: String,
    pub head: String,
    pub allocated: Decimal,
    pub created_at: String,
}

impl Department {
    pub fn new(code: String, name: String, allocated: Decimal) -> Self {
        Self {
            id: None,
            code,
            name,
            head: String::new(),
            allocated,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Find a department by code (case-insensitive) in a slice.
    pub fn find_by_code<'a>(departments: &'a [Department], code: &str) -> Option<&'a Department> {
        departments
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
