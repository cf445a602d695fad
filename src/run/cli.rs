use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use budgetdesk::alerts::notifications_for_ledger;
use budgetdesk::config::Config;
use budgetdesk::engine::{BudgetStatusEngine, Status};
use budgetdesk::import::{parse_amount, CsvImporter};
use budgetdesk::ledger::Ledger;
use budgetdesk::models::{ExpenseCategory, ExpenseReport};
use budgetdesk::report::{
    build_rows, filter_rows, format_amount, format_rate, name_filter, render_table,
    rows_for_lines, ReportRow, Scope, Summary,
};

use super::{shellexpand, Invocation};

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    let inv = Invocation::parse(args)?;
    let config = Config::load(inv.config_path.as_deref(), &inv.overrides)?;
    let engine = config.engine();
    debug!(command = ?inv.command(), "dispatching");

    match inv.command().unwrap_or("summary") {
        "summary" | "s" => cli_summary(&engine),
        "departments" | "projects" | "missions" => {
            let scope = inv
                .command()
                .and_then(Scope::parse)
                .ok_or_else(|| anyhow::anyhow!("Unknown scope"))?;
            cli_table(scope, &inv, &engine)
        }
        "expenses" => cli_expenses(inv.command_args()),
        "alerts" => cli_alerts(&engine),
        "check" => cli_check(inv.command_args(), &engine),
        "import" => cli_import(inv.command_args(), &inv, &engine),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetdesk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("budgetdesk — budget utilization for departments, projects and missions");
    println!();
    println!("Usage: budgetdesk [command] [flags]");
    println!();
    println!("Commands:");
    println!("  summary                       Overall budget and status counts (default)");
    println!("  departments | projects | missions");
    println!("                                Budget table for one scope");
    println!("  expenses [category]           List expense reports, optionally one category");
    println!("  alerts                        Budget notifications, most severe first");
    println!("  check <allocated> <spent>     Evaluate a single budget");
    println!("  import <file.csv>             Budget table for CSV lines (name, allocated, spent)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Flags:");
    println!("  --approaching <pct>           Approaching-limit threshold (default 80)");
    println!("  --over <pct>                  Over-budget threshold (default 100)");
    println!("  --filter <regex>              Only rows whose name matches");
    println!("  --config <path>               JSON config file (approaching_threshold, over_threshold)");
}

fn print_thresholds(engine: &BudgetStatusEngine) {
    let t = engine.thresholds();
    println!(
        "Thresholds: approaching at {}%, over at {}%",
        t.approaching().normalize(),
        t.over().normalize()
    );
}

fn cli_summary(engine: &BudgetStatusEngine) -> Result<()> {
    let ledger = Ledger::with_demo_data()?;
    let overall = ledger.overall_envelope()?;
    let u = engine.compute(overall.allocated, overall.spent)?;

    println!("budgetdesk — summary");
    println!("{}", "─".repeat(48));
    println!("  Allocated:  {}", format_amount(overall.allocated));
    println!("  Spent:      {}", format_amount(overall.spent));
    println!("  Remaining:  {}", format_amount(u.remaining));
    println!("  Used:       {} ({})", format_rate(&u.rate), u.status);
    println!();

    println!(
        "  {:<14} {:>14} {:>18} {:>12}",
        "Scope",
        Status::WithinLimit.as_str(),
        Status::ApproachingLimit.as_str(),
        Status::OverBudget.as_str()
    );
    for scope in Scope::all() {
        let rows = build_rows(&ledger, *scope, engine)?;
        let summary = Summary::from_rows(&rows)?;
        println!(
            "  {:<14} {:>14} {:>18} {:>12}",
            scope.as_str(),
            summary.within_limit,
            summary.approaching_limit,
            summary.over_budget
        );
    }

    let pending = ledger.get_pending_expense_reports().len();
    if pending > 0 {
        println!();
        println!("  {pending} expense report(s) awaiting approval");
    }
    println!();
    print_thresholds(engine);
    Ok(())
}

fn cli_table(scope: Scope, inv: &Invocation, engine: &BudgetStatusEngine) -> Result<()> {
    let ledger = Ledger::with_demo_data()?;
    let rows = build_rows(&ledger, scope, engine)?;
    print_rows(scope, rows, inv)
}

fn print_rows(scope: Scope, rows: Vec<ReportRow>, inv: &Invocation) -> Result<()> {
    let pattern = inv.filter.as_deref().map(name_filter).transpose()?;
    let rows = filter_rows(rows, pattern.as_ref());

    println!("{scope}");
    print!("{}", render_table(&rows));
    if !rows.is_empty() {
        let summary = Summary::from_rows(&rows)?;
        println!();
        println!(
            "Total: {} of {} spent, {} within / {} approaching / {} over",
            format_amount(summary.envelope.spent),
            format_amount(summary.envelope.allocated),
            summary.within_limit,
            summary.approaching_limit,
            summary.over_budget
        );
    }
    Ok(())
}

fn cli_expenses(args: &[String]) -> Result<()> {
    let ledger = Ledger::with_demo_data()?;
    let reports: Vec<&ExpenseReport> = match args.first() {
        Some(raw) => {
            let category = ExpenseCategory::parse(raw)
                .ok_or_else(|| anyhow::anyhow!("Unknown expense category: {raw}"))?;
            ledger.get_expense_reports_in_category(category)
        }
        None => ledger.get_expense_reports().iter().collect(),
    };
    if reports.is_empty() {
        println!("No expense reports");
        return Ok(());
    }

    println!(
        "{:<4} {:<12} {:<10} {:>12} {:<10} {}",
        "ID", "Mission", "Category", "Amount", "Submitted", "Status"
    );
    println!("{}", "─".repeat(62));
    for report in reports {
        let mission = ledger
            .get_mission(report.mission_id)
            .map(|m| m.destination.as_str())
            .unwrap_or("?");
        println!(
            "{:<4} {:<12} {:<10} {:>12} {:<10} {}",
            report.id.unwrap_or(0),
            mission,
            report.category.as_str(),
            format_amount(report.amount),
            report.submitted_on.format("%Y-%m-%d").to_string(),
            report.status,
        );
    }

    println!();
    println!("Approved by category:");
    for (category, total) in ledger.approved_totals_by_category()? {
        if !total.is_zero() {
            println!("  {:<10} {:>12}", category.as_str(), format_amount(total));
        }
    }
    Ok(())
}

fn cli_alerts(engine: &BudgetStatusEngine) -> Result<()> {
    let ledger = Ledger::with_demo_data()?;
    let notifications = notifications_for_ledger(&ledger, engine)?;
    if notifications.is_empty() {
        println!("No alerts");
        return Ok(());
    }
    for n in &notifications {
        println!("{n}");
    }
    Ok(())
}

fn cli_check(args: &[String], engine: &BudgetStatusEngine) -> Result<()> {
    if args.len() != 2 {
        anyhow::bail!("Usage: budgetdesk check <allocated> <spent>");
    }
    let allocated = parse_amount("allocated", &args[0])?;
    let spent = parse_amount("spent", &args[1])?;
    let u = engine.compute(allocated, spent)?;

    println!("  Allocated:  {}", format_amount(allocated));
    println!("  Spent:      {}", format_amount(spent));
    println!("  Remaining:  {}", format_amount(u.remaining));
    println!("  Used:       {}", format_rate(&u.rate));
    println!("  Status:     {}", u.status);
    Ok(())
}

fn cli_import(args: &[String], inv: &Invocation, engine: &BudgetStatusEngine) -> Result<()> {
    let file_path = args
        .first()
        .map(|a| shellexpand(a))
        .ok_or_else(|| anyhow::anyhow!("Usage: budgetdesk import <file.csv>"))?;
    let path = Path::new(&file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let lines = CsvImporter::read(path)
        .with_context(|| format!("Failed to import {file_path}"))?;
    let rows = rows_for_lines(&lines, engine)?;
    print_rows(Scope::Imported, rows, inv)
}
