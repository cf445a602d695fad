//! The in-memory book of departments, projects, missions and expense reports.
//!
//! Ids come from one counter shared by all record kinds, so an id is never
//! reused within a ledger. Derived budget figures are computed on demand.

mod seed;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::*;

#[derive(Debug, Clone)]
pub struct Ledger {
    departments: Vec<Department>,
    projects: Vec<Project>,
    missions: Vec<Mission>,
    expense_reports: Vec<ExpenseReport>,
    next_id: i64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            departments: Vec::new(),
            projects: Vec::new(),
            missions: Vec::new(),
            expense_reports: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ── Departments ───────────────────────────────────────────

    pub fn insert_department(&mut self, dept: &Department) -> Result<i64> {
        let code = dept.code.trim();
        if code.is_empty() {
            anyhow::bail!("Department code cannot be empty");
        }
        if Department::find_by_code(&self.departments, code).is_some() {
            anyhow::bail!("Department code '{code}' already exists");
        }
        let id = self.allocate_id();
        let mut dept = dept.clone();
        dept.id = Some(id);
        dept.code = code.to_string();
        debug!(id, code = %dept.code, "inserted department");
        self.departments.push(dept);
        Ok(id)
    }

    pub fn get_department(&self, id: i64) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == Some(id))
    }

    pub fn get_departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn update_department(&mut self, dept: &Department) -> Result<()> {
        let id = dept
            .id
            .ok_or_else(|| anyhow::anyhow!("Department has no ID"))?;
        let code = dept.code.trim();
        if code.is_empty() {
            anyhow::bail!("Department code cannot be empty");
        }
        let clash = self
            .departments
            .iter()
            .any(|d| d.id != Some(id) && d.code.eq_ignore_ascii_case(code));
        if clash {
            anyhow::bail!("Department code '{code}' already exists");
        }
        let slot = self
            .departments
            .iter_mut()
            .find(|d| d.id == Some(id))
            .ok_or_else(|| anyhow::anyhow!("Department {id} not found"))?;
        *slot = dept.clone();
        slot.code = code.to_string();
        debug!(id, "updated department");
        Ok(())
    }

    pub fn delete_department(&mut self, id: i64) -> Result<()> {
        let linked = self.projects.iter().filter(|p| p.department_id == id).count();
        if linked > 0 {
            warn!(id, linked, "refusing to delete department with projects");
            anyhow::bail!("Department {id} still has {linked} project(s)");
        }
        let before = self.departments.len();
        self.departments.retain(|d| d.id != Some(id));
        if self.departments.len() == before {
            anyhow::bail!("Department {id} not found");
        }
        debug!(id, "deleted department");
        Ok(())
    }

    // ── Projects ──────────────────────────────────────────────

    pub fn insert_project(&mut self, project: &Project) -> Result<i64> {
        if self.get_department(project.department_id).is_none() {
            anyhow::bail!("Department {} not found", project.department_id);
        }
        let id = self.allocate_id();
        let mut project = project.clone();
        project.id = Some(id);
        debug!(id, department_id = project.department_id, "inserted project");
        self.projects.push(project);
        Ok(id)
    }

    pub fn get_project(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == Some(id))
    }

    pub fn get_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_projects_for_department(&self, department_id: i64) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.department_id == department_id)
            .collect()
    }

    pub fn update_project(&mut self, project: &Project) -> Result<()> {
        let id = project
            .id
            .ok_or_else(|| anyhow::anyhow!("Project has no ID"))?;
        if self.get_department(project.department_id).is_none() {
            anyhow::bail!("Department {} not found", project.department_id);
        }
        let slot = self
            .projects
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| anyhow::anyhow!("Project {id} not found"))?;
        *slot = project.clone();
        debug!(id, "updated project");
        Ok(())
    }

    pub fn delete_project(&mut self, id: i64) -> Result<()> {
        let linked = self.missions.iter().filter(|m| m.project_id == id).count();
        if linked > 0 {
            warn!(id, linked, "refusing to delete project with missions");
            anyhow::bail!("Project {id} still has {linked} mission(s)");
        }
        let before = self.projects.len();
        self.projects.retain(|p| p.id != Some(id));
        if self.projects.len() == before {
            anyhow::bail!("Project {id} not found");
        }
        debug!(id, "deleted project");
        Ok(())
    }

    // ── Missions ──────────────────────────────────────────────

    pub fn insert_mission(&mut self, mission: &Mission) -> Result<i64> {
        if self.get_project(mission.project_id).is_none() {
            anyhow::bail!("Project {} not found", mission.project_id);
        }
        if mission.end_date < mission.start_date {
            anyhow::bail!(
                "Mission to {} ends ({}) before it starts ({})",
                mission.destination,
                mission.end_date,
                mission.start_date
            );
        }
        let id = self.allocate_id();
        let mut mission = mission.clone();
        mission.id = Some(id);
        debug!(id, project_id = mission.project_id, "inserted mission");
        self.missions.push(mission);
        Ok(id)
    }

    pub fn get_mission(&self, id: i64) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == Some(id))
    }

    pub fn get_missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn get_missions_for_project(&self, project_id: i64) -> Vec<&Mission> {
        self.missions
            .iter()
            .filter(|m| m.project_id == project_id)
            .collect()
    }

    pub fn delete_mission(&mut self, id: i64) -> Result<()> {
        let linked = self
            .expense_reports
            .iter()
            .filter(|r| r.mission_id == id)
            .count();
        if linked > 0 {
            warn!(id, linked, "refusing to delete mission with expense reports");
            anyhow::bail!("Mission {id} still has {linked} expense report(s)");
        }
        let before = self.missions.len();
        self.missions.retain(|m| m.id != Some(id));
        if self.missions.len() == before {
            anyhow::bail!("Mission {id} not found");
        }
        debug!(id, "deleted mission");
        Ok(())
    }

    // ── Expense reports ───────────────────────────────────────

    /// Record a new report. It always enters the ledger as pending.
    pub fn submit_expense_report(&mut self, report: &ExpenseReport) -> Result<i64> {
        if self.get_mission(report.mission_id).is_none() {
            anyhow::bail!("Mission {} not found", report.mission_id);
        }
        if report.amount <= Decimal::ZERO {
            anyhow::bail!("Expense amount must be positive, got {}", report.amount);
        }
        let id = self.allocate_id();
        let mut report = report.clone();
        report.id = Some(id);
        report.status = ExpenseStatus::Pending;
        debug!(id, mission_id = report.mission_id, amount = %report.amount, "submitted expense report");
        self.expense_reports.push(report);
        Ok(id)
    }

    pub fn get_expense_report(&self, id: i64) -> Option<&ExpenseReport> {
        self.expense_reports.iter().find(|r| r.id == Some(id))
    }

    pub fn get_expense_reports(&self) -> &[ExpenseReport] {
        &self.expense_reports
    }

    pub fn get_pending_expense_reports(&self) -> Vec<&ExpenseReport> {
        self.expense_reports
            .iter()
            .filter(|r| r.is_pending())
            .collect()
    }

    pub fn get_expense_reports_in_category(&self, category: ExpenseCategory) -> Vec<&ExpenseReport> {
        self.expense_reports
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Approved spending per category, in [`ExpenseCategory::all`] order.
    pub fn approved_totals_by_category(&self) -> Result<Vec<(ExpenseCategory, Decimal)>> {
        ExpenseCategory::all()
            .iter()
            .map(|&category| {
                let total = sum(
                    self.expense_reports
                        .iter()
                        .filter(|r| r.category == category && r.is_approved())
                        .map(|r| r.amount),
                )
                .with_context(|| format!("Approved {category} expenses overflow"))?;
                Ok((category, total))
            })
            .collect()
    }

    /// Approve a pending report and charge its amount to the mission's project.
    pub fn approve_expense_report(&mut self, id: i64) -> Result<()> {
        let (mission_id, amount) = {
            let report = self.pending_report(id)?;
            (report.mission_id, report.amount)
        };
        let project_id = self
            .get_mission(mission_id)
            .map(|m| m.project_id)
            .ok_or_else(|| anyhow::anyhow!("Mission {mission_id} not found"))?;
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == Some(project_id))
            .ok_or_else(|| anyhow::anyhow!("Project {project_id} not found"))?;
        project.spent = project
            .spent
            .checked_add(amount)
            .with_context(|| format!("Charging {amount} overflows project {project_id}"))?;

        if let Some(report) = self.expense_reports.iter_mut().find(|r| r.id == Some(id)) {
            report.status = ExpenseStatus::Approved;
        }
        info!(id, project_id, amount = %amount, "approved expense report");
        Ok(())
    }

    pub fn reject_expense_report(&mut self, id: i64) -> Result<()> {
        self.pending_report(id)?;
        if let Some(report) = self.expense_reports.iter_mut().find(|r| r.id == Some(id)) {
            report.status = ExpenseStatus::Rejected;
        }
        info!(id, "rejected expense report");
        Ok(())
    }

    fn pending_report(&self, id: i64) -> Result<&ExpenseReport> {
        let report = self
            .get_expense_report(id)
            .ok_or_else(|| anyhow::anyhow!("Expense report {id} not found"))?;
        if !report.is_pending() {
            anyhow::bail!("Expense report {id} is already {}", report.status);
        }
        Ok(report)
    }

    // ── Envelopes ─────────────────────────────────────────────

    pub fn project_envelope(&self, id: i64) -> Result<Envelope> {
        self.get_project(id)
            .map(Project::envelope)
            .ok_or_else(|| anyhow::anyhow!("Project {id} not found"))
    }

    /// Department allocation against everything its projects have spent.
    pub fn department_envelope(&self, id: i64) -> Result<Envelope> {
        let dept = self
            .get_department(id)
            .ok_or_else(|| anyhow::anyhow!("Department {id} not found"))?;
        let spent = sum(
            self.projects
                .iter()
                .filter(|p| p.department_id == id)
                .map(|p| p.spent),
        )
        .with_context(|| format!("Spending of department {id} overflows"))?;
        Ok(Envelope::new(dept.allocated, spent))
    }

    /// Estimated mission cost against its approved expense reports.
    pub fn mission_envelope(&self, id: i64) -> Result<Envelope> {
        let mission = self
            .get_mission(id)
            .ok_or_else(|| anyhow::anyhow!("Mission {id} not found"))?;
        let spent = sum(
            self.expense_reports
                .iter()
                .filter(|r| r.mission_id == id && r.is_approved())
                .map(|r| r.amount),
        )
        .with_context(|| format!("Expenses of mission {id} overflow"))?;
        Ok(Envelope::new(mission.estimated_cost, spent))
    }

    pub fn overall_envelope(&self) -> Result<Envelope> {
        let allocated = sum(self.departments.iter().map(|d| d.allocated))
            .context("Total department allocation overflows")?;
        let spent = sum(self.projects.iter().map(|p| p.spent))
            .context("Total project spending overflows")?;
        Ok(Envelope::new(allocated, spent))
    }
}

fn sum(amounts: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        total = total
            .checked_add(amount)
            .ok_or_else(|| anyhow::anyhow!("Amount out of range"))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests;
