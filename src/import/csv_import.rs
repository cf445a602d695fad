use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{BudgetError, InvalidReason};
use crate::models::Envelope;

/// A named allocation read from a spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    pub name: String,
    pub envelope: Envelope,
}

/// Which column holds what. Defaults to `name, allocated, spent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    pub name_column: usize,
    pub allocated_column: usize,
    pub spent_column: usize,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            name_column: 0,
            allocated_column: 1,
            spent_column: 2,
        }
    }
}

impl CsvLayout {
    /// Locate columns by header name, keeping the default position for any
    /// column that isn't recognised.
    pub fn from_headers(headers: &[String]) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };
        let default = Self::default();
        Self {
            name_column: find(&["name", "project", "department", "mission", "label"])
                .unwrap_or(default.name_column),
            allocated_column: find(&["allocated", "budget", "allocation", "amount allocated"])
                .unwrap_or(default.allocated_column),
            spent_column: find(&["spent", "expenses", "actual", "amount spent"])
                .unwrap_or(default.spent_column),
        }
    }
}

pub struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and split off the header row if there is one.
    pub fn preview(path: &Path) -> Result<(Option<Vec<String>>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // A header row has at least one amount cell and none of them parse
        let amount_cells = all_rows[0].get(1..).unwrap_or(&[]);
        let looks_like_header = !amount_cells.is_empty()
            && amount_cells
                .iter()
                .all(|field| parse_amount("header", field).is_err());

        if looks_like_header {
            let headers = all_rows.remove(0);
            debug!(?headers, "detected CSV header");
            Ok((Some(headers), all_rows))
        } else {
            Ok((None, all_rows))
        }
    }

    pub fn parse(rows: &[Vec<String>], layout: &CsvLayout) -> Result<Vec<BudgetLine>> {
        let mut lines = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let name = cell(row, layout.name_column);
            if name.is_empty() {
                anyhow::bail!("Row {}: missing name", i + 1);
            }

            let allocated = parse_amount("allocated", &cell(row, layout.allocated_column))
                .with_context(|| format!("Row {}: failed to parse allocated amount", i + 1))?;
            let spent = parse_amount("spent", &cell(row, layout.spent_column))
                .with_context(|| format!("Row {}: failed to parse spent amount", i + 1))?;

            lines.push(BudgetLine {
                name,
                envelope: Envelope::new(allocated, spent),
            });
        }

        Ok(lines)
    }

    /// Preview, detect the layout and parse in one go.
    pub fn read(path: &Path) -> Result<Vec<BudgetLine>> {
        let (headers, rows) = Self::preview(path)?;
        let layout = headers
            .as_deref()
            .map(CsvLayout::from_headers)
            .unwrap_or_default();
        let lines = Self::parse(&rows, &layout)?;
        info!(count = lines.len(), path = %path.display(), "imported budget lines");
        Ok(lines)
    }
}

fn cell(row: &[String], column: usize) -> String {
    row.get(column)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Parse a money cell. Accepts `$`, thousands separators and `(123.45)` negatives;
/// an empty cell is zero. Anything else that isn't a plain decimal, including
/// `NaN` and `inf`, is invalid input.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, BudgetError> {
    let cleaned = raw
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| BudgetError::invalid(field, InvalidReason::NotANumber))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
