mod csv_import;

pub use csv_import::{parse_amount, BudgetLine, CsvImporter, CsvLayout};
