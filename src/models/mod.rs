mod department;
mod envelope;
mod expense_report;
mod mission;
mod project;

pub use department::Department;
pub use envelope::Envelope;
pub use expense_report::{ExpenseCategory, ExpenseReport, ExpenseStatus};
pub use mission::{Mission, MissionStatus};
pub use project::{Project, ProjectStatus};
