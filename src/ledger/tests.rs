#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::engine::{Status, Thresholds};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One department, one project, one mission.
fn setup() -> (Ledger, i64, i64, i64) {
    let mut ledger = Ledger::new();
    let dept = ledger
        .insert_department(&Department::new("ENG".into(), "Engineering".into(), dec!(100000)))
        .unwrap();
    let mut project = Project::new(dept, "P-1".into(), "Portal".into(), dec!(10000), date(2024, 1, 1));
    project.spent = dec!(2000);
    let project = ledger.insert_project(&project).unwrap();
    let mission = ledger
        .insert_mission(&Mission::new(
            project,
            "Lyon".into(),
            date(2024, 3, 4),
            date(2024, 3, 6),
            dec!(1500),
        ))
        .unwrap();
    (ledger, dept, project, mission)
}

// ── Departments ───────────────────────────────────────────────

#[test]
fn test_department_crud() {
    let mut ledger = Ledger::new();
    let id = ledger
        .insert_department(&Department::new(" FIN ".into(), "Finance".into(), dec!(5000)))
        .unwrap();
    let fetched = ledger.get_department(id).unwrap();
    assert_eq!(fetched.id, Some(id));
    assert_eq!(fetched.code, "FIN");

    let mut updated = fetched.clone();
    updated.allocated = dec!(7500);
    ledger.update_department(&updated).unwrap();
    assert_eq!(ledger.get_department(id).unwrap().allocated, dec!(7500));

    ledger.delete_department(id).unwrap();
    assert!(ledger.get_department(id).is_none());
    assert!(ledger.get_departments().is_empty());
}

#[test]
fn test_department_code_unique_case_insensitive() {
    let mut ledger = Ledger::new();
    ledger
        .insert_department(&Department::new("ENG".into(), "Engineering".into(), dec!(1)))
        .unwrap();
    let err = ledger
        .insert_department(&Department::new("eng".into(), "Other".into(), dec!(1)))
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_department_empty_code_rejected() {
    let mut ledger = Ledger::new();
    assert!(ledger
        .insert_department(&Department::new("  ".into(), "Nameless".into(), dec!(1)))
        .is_err());
}

#[test]
fn test_update_department_code_clash() {
    let mut ledger = Ledger::new();
    ledger
        .insert_department(&Department::new("ENG".into(), "Engineering".into(), dec!(1)))
        .unwrap();
    let ops = ledger
        .insert_department(&Department::new("OPS".into(), "Operations".into(), dec!(1)))
        .unwrap();
    let mut renamed = ledger.get_department(ops).unwrap().clone();
    renamed.code = "ENG".into();
    assert!(ledger.update_department(&renamed).is_err());
}

#[test]
fn test_update_department_blank_code_rejected() {
    let mut ledger = Ledger::new();
    let id = ledger
        .insert_department(&Department::new("ENG".into(), "Engineering".into(), dec!(1)))
        .unwrap();
    let mut blank = ledger.get_department(id).unwrap().clone();
    blank.code = "   ".into();
    let err = ledger.update_department(&blank).unwrap_err();
    assert!(err.to_string().contains("cannot be empty"));
    assert_eq!(ledger.get_department(id).unwrap().code, "ENG");
}

#[test]
fn test_update_department_trims_code() {
    let mut ledger = Ledger::new();
    let id = ledger
        .insert_department(&Department::new("ENG".into(), "Engineering".into(), dec!(1)))
        .unwrap();
    let mut renamed = ledger.get_department(id).unwrap().clone();
    renamed.code = "  RND ".into();
    ledger.update_department(&renamed).unwrap();
    assert_eq!(ledger.get_department(id).unwrap().code, "RND");
}

#[test]
fn test_update_department_without_id() {
    let mut ledger = Ledger::new();
    let dept = Department::new("ENG".into(), "Engineering".into(), dec!(1));
    let err = ledger.update_department(&dept).unwrap_err();
    assert!(err.to_string().contains("no ID"));
}

#[test]
fn test_delete_department_with_projects_refused() {
    let (mut ledger, dept, _, _) = setup();
    let err = ledger.delete_department(dept).unwrap_err();
    assert!(err.to_string().contains("project"));
    assert!(ledger.get_department(dept).is_some());
}

#[test]
fn test_delete_department_not_found() {
    let mut ledger = Ledger::new();
    assert!(ledger.delete_department(42).is_err());
}

// ── Projects ──────────────────────────────────────────────────

#[test]
fn test_project_requires_department() {
    let mut ledger = Ledger::new();
    let project = Project::new(99, "P".into(), "Orphan".into(), dec!(1), date(2024, 1, 1));
    let err = ledger.insert_project(&project).unwrap_err();
    assert!(err.to_string().contains("Department 99 not found"));
}

#[test]
fn test_projects_for_department() {
    let (mut ledger, dept, _, _) = setup();
    let other = ledger
        .insert_department(&Department::new("OPS".into(), "Operations".into(), dec!(1)))
        .unwrap();
    ledger
        .insert_project(&Project::new(other, "O-1".into(), "Fleet".into(), dec!(1), date(2024, 1, 1)))
        .unwrap();
    assert_eq!(ledger.get_projects_for_department(dept).len(), 1);
    assert_eq!(ledger.get_projects_for_department(other).len(), 1);
    assert_eq!(ledger.get_projects().len(), 2);
}

#[test]
fn test_update_project() {
    let (mut ledger, _, project, _) = setup();
    let mut p = ledger.get_project(project).unwrap().clone();
    p.status = ProjectStatus::OnHold;
    p.spent = dec!(9000);
    ledger.update_project(&p).unwrap();
    let fetched = ledger.get_project(project).unwrap();
    assert_eq!(fetched.status, ProjectStatus::OnHold);
    assert_eq!(fetched.spent, dec!(9000));
}

#[test]
fn test_delete_project_with_missions_refused() {
    let (mut ledger, _, project, _) = setup();
    assert!(ledger.delete_project(project).is_err());
}

#[test]
fn test_delete_project_after_mission_removed() {
    let (mut ledger, _, project, mission) = setup();
    ledger.delete_mission(mission).unwrap();
    ledger.delete_project(project).unwrap();
    assert!(ledger.get_project(project).is_none());
}

// ── Missions ──────────────────────────────────────────────────

#[test]
fn test_mission_requires_project() {
    let mut ledger = Ledger::new();
    let m = Mission::new(7, "Oslo".into(), date(2024, 1, 1), date(2024, 1, 2), dec!(1));
    assert!(ledger.insert_mission(&m).is_err());
}

#[test]
fn test_mission_end_before_start_rejected() {
    let (mut ledger, _, project, _) = setup();
    let m = Mission::new(project, "Oslo".into(), date(2024, 1, 5), date(2024, 1, 2), dec!(1));
    let err = ledger.insert_mission(&m).unwrap_err();
    assert!(err.to_string().contains("before it starts"));
}

#[test]
fn test_missions_for_project() {
    let (ledger, _, project, mission) = setup();
    let missions = ledger.get_missions_for_project(project);
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0].id, Some(mission));
    assert_eq!(ledger.get_missions().len(), 1);
}

#[test]
fn test_delete_mission_with_reports_refused() {
    let (mut ledger, _, _, mission) = setup();
    ledger
        .submit_expense_report(&ExpenseReport::new(
            mission,
            ExpenseCategory::Meals,
            dec!(40),
            date(2024, 3, 7),
        ))
        .unwrap();
    assert!(ledger.delete_mission(mission).is_err());
}

// ── Expense reports ───────────────────────────────────────────

#[test]
fn test_submit_forces_pending() {
    let (mut ledger, _, _, mission) = setup();
    let mut report = ExpenseReport::new(mission, ExpenseCategory::Lodging, dec!(300), date(2024, 3, 7));
    report.status = ExpenseStatus::Approved;
    let id = ledger.submit_expense_report(&report).unwrap();
    assert!(ledger.get_expense_report(id).unwrap().is_pending());
    assert_eq!(ledger.get_pending_expense_reports().len(), 1);
}

#[test]
fn test_submit_rejects_non_positive_amount() {
    let (mut ledger, _, _, mission) = setup();
    for amount in [dec!(0), dec!(-5)] {
        let report = ExpenseReport::new(mission, ExpenseCategory::Meals, amount, date(2024, 3, 7));
        assert!(ledger.submit_expense_report(&report).is_err());
    }
}

#[test]
fn test_submit_requires_mission() {
    let (mut ledger, ..) = setup();
    let report = ExpenseReport::new(999, ExpenseCategory::Meals, dec!(1), date(2024, 3, 7));
    assert!(ledger.submit_expense_report(&report).is_err());
}

#[test]
fn test_approve_charges_project() {
    let (mut ledger, _, project, mission) = setup();
    let id = ledger
        .submit_expense_report(&ExpenseReport::new(
            mission,
            ExpenseCategory::Transport,
            dec!(850.50),
            date(2024, 3, 7),
        ))
        .unwrap();
    ledger.approve_expense_report(id).unwrap();

    assert_eq!(ledger.get_project(project).unwrap().spent, dec!(2850.50));
    assert!(ledger.get_expense_report(id).unwrap().is_approved());
    assert!(ledger.get_pending_expense_reports().is_empty());
}

#[test]
fn test_approve_twice_refused() {
    let (mut ledger, _, project, mission) = setup();
    let id = ledger
        .submit_expense_report(&ExpenseReport::new(
            mission,
            ExpenseCategory::Transport,
            dec!(100),
            date(2024, 3, 7),
        ))
        .unwrap();
    ledger.approve_expense_report(id).unwrap();
    let err = ledger.approve_expense_report(id).unwrap_err();
    assert!(err.to_string().contains("already Approved"));
    assert_eq!(ledger.get_project(project).unwrap().spent, dec!(2100));
}

#[test]
fn test_reject_does_not_charge() {
    let (mut ledger, _, project, mission) = setup();
    let id = ledger
        .submit_expense_report(&ExpenseReport::new(
            mission,
            ExpenseCategory::Equipment,
            dec!(700),
            date(2024, 3, 7),
        ))
        .unwrap();
    ledger.reject_expense_report(id).unwrap();
    assert_eq!(
        ledger.get_expense_report(id).unwrap().status,
        ExpenseStatus::Rejected
    );
    assert_eq!(ledger.get_project(project).unwrap().spent, dec!(2000));
    assert!(ledger.approve_expense_report(id).is_err());
}

#[test]
fn test_approve_unknown_report() {
    let (mut ledger, ..) = setup();
    let err = ledger.approve_expense_report(12345).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

// ── Envelopes ─────────────────────────────────────────────────

#[test]
fn test_project_envelope() {
    let (ledger, _, project, _) = setup();
    assert_eq!(
        ledger.project_envelope(project).unwrap(),
        Envelope::new(dec!(10000), dec!(2000))
    );
    assert!(ledger.project_envelope(777).is_err());
}

#[test]
fn test_department_envelope_sums_projects() {
    let (mut ledger, dept, _, _) = setup();
    let mut second = Project::new(dept, "P-2".into(), "Mobile".into(), dec!(5000), date(2024, 1, 1));
    second.spent = dec!(1250.25);
    ledger.insert_project(&second).unwrap();
    assert_eq!(
        ledger.department_envelope(dept).unwrap(),
        Envelope::new(dec!(100000), dec!(3250.25))
    );
}

#[test]
fn test_mission_envelope_counts_only_approved() {
    let (mut ledger, _, _, mission) = setup();
    let approved = ledger
        .submit_expense_report(&ExpenseReport::new(
            mission,
            ExpenseCategory::Transport,
            dec!(600),
            date(2024, 3, 7),
        ))
        .unwrap();
    ledger
        .submit_expense_report(&ExpenseReport::new(
            mission,
            ExpenseCategory::Meals,
            dec!(90),
            date(2024, 3, 7),
        ))
        .unwrap();
    ledger.approve_expense_report(approved).unwrap();
    assert_eq!(
        ledger.mission_envelope(mission).unwrap(),
        Envelope::new(dec!(1500), dec!(600))
    );
}

#[test]
fn test_overall_envelope() {
    let (ledger, ..) = setup();
    assert_eq!(
        ledger.overall_envelope().unwrap(),
        Envelope::new(dec!(100000), dec!(2000))
    );
}

#[test]
fn test_overall_envelope_overflow() {
    let mut ledger = Ledger::new();
    ledger
        .insert_department(&Department::new("A".into(), "A".into(), Decimal::MAX))
        .unwrap();
    ledger
        .insert_department(&Department::new("B".into(), "B".into(), Decimal::MAX))
        .unwrap();
    assert!(ledger.overall_envelope().is_err());
}

#[test]
fn test_ids_are_never_reused() {
    let mut ledger = Ledger::new();
    let a = ledger
        .insert_department(&Department::new("A".into(), "A".into(), dec!(1)))
        .unwrap();
    ledger.delete_department(a).unwrap();
    let b = ledger
        .insert_department(&Department::new("B".into(), "B".into(), dec!(1)))
        .unwrap();
    assert_ne!(a, b);
}

// ── Demo data ─────────────────────────────────────────────────

#[test]
fn test_demo_data_reference_envelopes() {
    let ledger = Ledger::with_demo_data().unwrap();
    let t = Thresholds::default();
    let by_name = |name: &str| {
        let p = ledger.get_projects().iter().find(|p| p.name == name).unwrap();
        p.envelope().utilization(&t).unwrap()
    };

    let portal = by_name("Customer Portal");
    assert_eq!(portal.remaining, dec!(20000));
    assert_eq!(portal.status, Status::WithinLimit);

    let platform = by_name("Data Platform");
    assert_eq!(platform.remaining, dec!(25000));
    assert_eq!(platform.status, Status::WithinLimit);

    let fleet = by_name("Fleet Renewal");
    assert_eq!(fleet.remaining, Decimal::ZERO);
    assert_eq!(fleet.status, Status::OverBudget);

    let survey = by_name("Field Survey");
    assert_eq!(survey.remaining, dec!(-5000));
    assert_eq!(survey.status, Status::OverBudget);

    assert_eq!(by_name("Lab Upgrade").status, Status::ApproachingLimit);
}

#[test]
fn test_demo_data_pending_reports() {
    let ledger = Ledger::with_demo_data().unwrap();
    assert_eq!(ledger.get_departments().len(), 3);
    assert_eq!(ledger.get_missions().len(), 3);
    assert_eq!(ledger.get_expense_reports().len(), 6);
    assert_eq!(ledger.get_pending_expense_reports().len(), 2);
}

#[test]
fn test_expense_reports_in_category() {
    let ledger = Ledger::with_demo_data().unwrap();
    let meals = ledger.get_expense_reports_in_category(ExpenseCategory::Meals);
    assert_eq!(meals.len(), 2);
    assert!(meals.iter().all(|r| r.is_pending()));
    assert!(ledger
        .get_expense_reports_in_category(ExpenseCategory::Equipment)
        .is_empty());
}

#[test]
fn test_approved_totals_by_category() {
    let ledger = Ledger::with_demo_data().unwrap();
    let totals = ledger.approved_totals_by_category().unwrap();
    assert_eq!(totals.len(), ExpenseCategory::all().len());
    assert_eq!(totals[0], (ExpenseCategory::Transport, dec!(3750)));
    assert_eq!(totals[1], (ExpenseCategory::Lodging, dec!(3500)));
    assert_eq!(totals[2], (ExpenseCategory::Meals, Decimal::ZERO));
}
