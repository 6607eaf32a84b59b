//! Moves journal entries into the fiscal year their date belongs to.
//!
//! Needed once after changing the first day of the financial year.
//!
//! Usage:
//!   realign --check    - Show what would change
//!   realign --execute  - Move the entries

use std::collections::HashMap;

use tallybook_core::fiscal::FiscalCalendar;
use tallybook_db::repositories::{FiscalRepository, LedgerSettings, RealignReport};
use tallybook_shared::AppConfig;
use tallybook_shared::telemetry::init_tracing;

/// Entries listed per direction before the rest is summarized.
const LISTED_PER_DIRECTION: usize = 5;

/// Moves listed after an execute before the rest is summarized.
const LISTED_MOVES: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let execute = match std::env::args().nth(1).as_deref() {
        Some("--check") => false,
        Some("--execute") => true,
        _ => anyhow::bail!("You must specify either --check or --execute"),
    };

    let config = AppConfig::load()?;

    init_tracing(&config.logging)?;

    let calendar = LedgerSettings::from_config(&config.accounting)?.calendar;
    let db = tallybook_db::connect(&config.database).await?;
    let fiscal = FiscalRepository::new(db, calendar);

    let preview = fiscal.realign_check().await?;
    if preview.plan.is_empty() {
        println!("No entries need migration - all entries are in correct financial years");
        return Ok(());
    }
    print_plan(&calendar, &preview);

    if !execute {
        println!("This is a dry run. Use --execute to perform the migration.");
        return Ok(());
    }

    println!();
    println!("Executing migration...");
    let report = fiscal.realign_execute().await?;
    print_execution(&calendar, &report);
    Ok(())
}

fn print_plan(calendar: &FiscalCalendar, report: &RealignReport) {
    println!("Found {} entries needing migration:", report.plan.moves.len());
    println!();

    for ((from, to), moves) in report.plan.by_direction() {
        println!(
            "  {} -> {}: {} entries",
            calendar.label(from),
            calendar.label(to),
            moves.len()
        );
        for m in moves.iter().take(LISTED_PER_DIRECTION) {
            println!("    Entry {}-{:04}: date={}", m.from_year, m.seq, m.date);
        }
        if moves.len() > LISTED_PER_DIRECTION {
            println!("    ... and {} more", moves.len() - LISTED_PER_DIRECTION);
        }
        println!();
    }

    if !report.emptied_years.is_empty() {
        println!("Years that will be deleted (becoming empty):");
        for &year in &report.emptied_years {
            println!("  {}", calendar.label(year));
        }
        println!();
    }
}

fn print_execution(calendar: &FiscalCalendar, report: &RealignReport) {
    for &year in &report.missing_years {
        println!("  Created year {} (closed)", calendar.label(year));
    }

    let moves: HashMap<_, _> = report.plan.moves.iter().map(|m| (m.id, m)).collect();
    for assignment in report.assignments.iter().take(LISTED_MOVES) {
        if let Some(m) = moves.get(&assignment.id) {
            println!(
                "  Moved entry {}-{:04} -> {}-{:04} (date: {})",
                m.from_year, m.seq, assignment.year, assignment.seq, m.date
            );
        }
    }
    if report.assignments.len() > LISTED_MOVES {
        println!("  ... {} more entries moved", report.assignments.len() - LISTED_MOVES);
    }
    println!();
    println!("Successfully migrated {} entries", report.assignments.len());

    let balances: u64 = report.balance_rows.values().sum();
    if balances > 0 {
        println!();
        println!("WARNING: {balances} incoming balance records exist for affected years.");
        println!("You should review and potentially recalculate these balances:");
        for (&year, count) in &report.balance_rows {
            println!("  Year {}: {count} incoming balance records", calendar.label(year));
        }
    }

    for &year in &report.emptied_years {
        println!("  Deleted empty year {}", calendar.label(year));
    }
    println!();
    println!("Migration complete. Please verify account balances.");
}
