//! Tabular budget reports over the ledger or imported budget lines.

mod util;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::fmt::Write as _;

use crate::engine::{BudgetStatusEngine, Status, Utilization};
use crate::import::BudgetLine;
use crate::ledger::Ledger;
use crate::models::Envelope;

pub use util::{format_amount, format_rate};
pub(crate) use util::truncate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Departments,
    Projects,
    Missions,
    Imported,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Departments => "Departments",
            Self::Projects => "Projects",
            Self::Missions => "Missions",
            Self::Imported => "Imported",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "departments" | "department" | "dept" => Some(Self::Departments),
            "projects" | "project" => Some(Self::Projects),
            "missions" | "mission" => Some(Self::Missions),
            "imported" | "import" => Some(Self::Imported),
            _ => None,
        }
    }

    /// Scopes backed by the ledger.
    pub fn all() -> &'static [Scope] {
        &[Self::Departments, Self::Projects, Self::Missions]
    }

    /// Singular noun for messages, e.g. "Project".
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Departments => "Department",
            Self::Projects => "Project",
            Self::Missions => "Mission",
            Self::Imported => "Budget line",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub scope: Scope,
    pub id: i64,
    pub name: String,
    pub envelope: Envelope,
    pub utilization: Utilization,
}

impl ReportRow {
    fn new(
        scope: Scope,
        id: i64,
        name: String,
        envelope: Envelope,
        engine: &BudgetStatusEngine,
    ) -> Result<Self> {
        let utilization = engine
            .compute(envelope.allocated, envelope.spent)
            .with_context(|| format!("{} '{name}'", scope.noun()))?;
        Ok(Self {
            scope,
            id,
            name,
            envelope,
            utilization,
        })
    }

    pub fn status(&self) -> Status {
        self.utilization.status
    }
}

pub fn build_rows(
    ledger: &Ledger,
    scope: Scope,
    engine: &BudgetStatusEngine,
) -> Result<Vec<ReportRow>> {
    let mut rows = Vec::new();
    match scope {
        Scope::Departments => {
            for dept in ledger.get_departments() {
                let id = dept.id.unwrap_or(0);
                let envelope = ledger.department_envelope(id)?;
                rows.push(ReportRow::new(scope, id, dept.name.clone(), envelope, engine)?);
            }
        }
        Scope::Projects => {
            for project in ledger.get_projects() {
                let id = project.id.unwrap_or(0);
                rows.push(ReportRow::new(
                    scope,
                    id,
                    project.name.clone(),
                    project.envelope(),
                    engine,
                )?);
            }
        }
        Scope::Missions => {
            for mission in ledger.get_missions() {
                let id = mission.id.unwrap_or(0);
                let envelope = ledger.mission_envelope(id)?;
                rows.push(ReportRow::new(
                    scope,
                    id,
                    mission.destination.clone(),
                    envelope,
                    engine,
                )?);
            }
        }
        Scope::Imported => anyhow::bail!("Imported budget lines are not part of the ledger"),
    }
    Ok(rows)
}

/// Rows for imported budget lines, numbered from 1 in file order.
pub fn rows_for_lines(lines: &[BudgetLine], engine: &BudgetStatusEngine) -> Result<Vec<ReportRow>> {
    lines
        .iter()
        .zip(1..)
        .map(|(line, id)| ReportRow::new(Scope::Imported, id, line.name.clone(), line.envelope, engine))
        .collect()
}

/// Compile a case-insensitive name filter.
pub fn name_filter(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("Invalid filter pattern '{pattern}'"))
}

pub fn filter_rows(rows: Vec<ReportRow>, pattern: Option<&Regex>) -> Vec<ReportRow> {
    match pattern {
        Some(re) => rows.into_iter().filter(|r| re.is_match(&r.name)).collect(),
        None => rows,
    }
}

/// Totals and status counts across a set of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub envelope: Envelope,
    pub within_limit: usize,
    pub approaching_limit: usize,
    pub over_budget: usize,
}

impl Summary {
    pub fn from_rows(rows: &[ReportRow]) -> Result<Self> {
        let mut summary = Summary {
            envelope: Envelope::default(),
            within_limit: 0,
            approaching_limit: 0,
            over_budget: 0,
        };
        for row in rows {
            summary.envelope = summary
                .envelope
                .checked_add(&row.envelope)
                .context("Report totals overflow")?;
            match row.status() {
                Status::WithinLimit => summary.within_limit += 1,
                Status::ApproachingLimit => summary.approaching_limit += 1,
                Status::OverBudget => summary.over_budget += 1,
            }
        }
        Ok(summary)
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::WithinLimit => self.within_limit,
            Status::ApproachingLimit => self.approaching_limit,
            Status::OverBudget => self.over_budget,
        }
    }
}

const NAME_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 15;
const BAR_WIDTH: usize = 10;

pub fn render_table(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return "No entries\n".to_string();
    }

    let mut out = String::new();
    let header = format!(
        "{:<4} {:<name$} {:>amt$} {:>amt$} {:>amt$} {:>10} {:<bar$} Status",
        "ID",
        "Name",
        "Allocated",
        "Spent",
        "Remaining",
        "Used",
        "",
        name = NAME_WIDTH,
        amt = AMOUNT_WIDTH,
        bar = BAR_WIDTH + 2,
    );
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "─".repeat(header.chars().count()));

    for row in rows {
        let u = &row.utilization;
        let _ = writeln!(
            out,
            "{:<4} {:<name$} {:>amt$} {:>amt$} {:>amt$} {:>10} {} {}",
            row.id,
            truncate(&row.name, NAME_WIDTH),
            format_amount(row.envelope.allocated),
            format_amount(row.envelope.spent),
            format_amount(u.remaining),
            format_rate(&u.rate),
            util::usage_bar(&u.rate, BAR_WIDTH),
            u.status,
            name = NAME_WIDTH,
            amt = AMOUNT_WIDTH,
        );
    }
    out
}


#[cfg(test)]
#[path = "util_tests.rs"]
mod util_tests;
