use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Ledger;
use crate::models::*;

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| anyhow::anyhow!("Invalid date {y}-{m}-{d}"))
}

fn amount(whole: i64) -> Decimal {
    Decimal::new(whole, 0)
}

impl Ledger {
    /// A small organisation with budgets in every status band.
    pub fn with_demo_data() -> Result<Self> {
        let mut ledger = Ledger::new();

        let mut eng = Department::new("ENG".into(), "Engineering".into(), amount(300_000));
        eng.head = "Amal Haddad".into();
        let eng = ledger.insert_department(&eng)?;

        let mut ops = Department::new("OPS".into(), "Operations".into(), amount(150_000));
        ops.head = "Jonas Weber".into();
        let ops = ledger.insert_department(&ops)?;

        let mut res = Department::new("RES".into(), "Research".into(), amount(160_000));
        res.head = "Ines Moreau".into();
        let res = ledger.insert_department(&res)?;

        let portal = ledger.insert_project(&project(
            eng,
            "ENG-01",
            "Customer Portal",
            amount(50_000),
            amount(30_000),
            date(2024, 1, 8)?,
        ))?;
        ledger.insert_project(&project(
            eng,
            "ENG-02",
            "Data Platform",
            amount(120_000),
            amount(95_000),
            date(2024, 2, 1)?,
        ))?;
        // Spending on these two lands partly through the approvals below.
        let fleet = ledger.insert_project(&project(
            ops,
            "OPS-01",
            "Fleet Renewal",
            amount(35_000),
            amount(32_950),
            date(2024, 3, 4)?,
        ))?;
        let survey = ledger.insert_project(&project(
            res,
            "RES-01",
            "Field Survey",
            amount(65_000),
            amount(64_800),
            date(2024, 2, 19)?,
        ))?;
        ledger.insert_project(&project(
            res,
            "RES-02",
            "Lab Upgrade",
            amount(80_000),
            amount(68_000),
            date(2024, 4, 1)?,
        ))?;

        let mut nairobi = Mission::new(
            survey,
            "Nairobi".into(),
            date(2024, 4, 8)?,
            date(2024, 4, 19)?,
            amount(6_000),
        );
        nairobi.purpose = "Site sampling".into();
        nairobi.status = MissionStatus::Completed;
        let nairobi = ledger.insert_mission(&nairobi)?;

        let mut hamburg = Mission::new(
            fleet,
            "Hamburg".into(),
            date(2024, 5, 13)?,
            date(2024, 5, 15)?,
            amount(1_800),
        );
        hamburg.purpose = "Vendor inspection".into();
        hamburg.status = MissionStatus::Completed;
        let hamburg = ledger.insert_mission(&hamburg)?;

        let mut lisbon = Mission::new(
            portal,
            "Lisbon".into(),
            date(2024, 6, 3)?,
            date(2024, 6, 5)?,
            amount(2_500),
        );
        lisbon.purpose = "User workshops".into();
        lisbon.status = MissionStatus::InProgress;
        let lisbon = ledger.insert_mission(&lisbon)?;

        let reports = [
            (nairobi, ExpenseCategory::Transport, 2_800, date(2024, 4, 22)?, true),
            (nairobi, ExpenseCategory::Lodging, 2_400, date(2024, 4, 22)?, true),
            (nairobi, ExpenseCategory::Meals, 900, date(2024, 4, 23)?, false),
            (hamburg, ExpenseCategory::Transport, 950, date(2024, 5, 16)?, true),
            (hamburg, ExpenseCategory::Lodging, 1_100, date(2024, 5, 16)?, true),
            (lisbon, ExpenseCategory::Meals, 180, date(2024, 6, 4)?, false),
        ];
        for (mission_id, category, value, submitted_on, approve) in reports {
            let report = ExpenseReport::new(mission_id, category, amount(value), submitted_on);
            let id = ledger.submit_expense_report(&report)?;
            if approve {
                ledger.approve_expense_report(id)?;
            }
        }

        Ok(ledger)
    }
}

fn project(
    department_id: i64,
    code: &str,
    name: &str,
    allocated: Decimal,
    spent: Decimal,
    start_date: NaiveDate,
) -> Project {
    let mut p = Project::new(department_id, code.into(), name.into(), allocated, start_date);
    p.spent = spent;
    p.status = ProjectStatus::Active;
    p
}
