//! Database seeder for Tallybook development and testing.
//!
//! Seeds a small chart of accounts, a cost object and the current fiscal
//! year. Running it again leaves an already seeded database unchanged.
//!
//! Usage: cargo run --bin seeder

use tallybook_core::ledger::ObjectRequirement;
use tallybook_db::repositories::{
    ChartRepository, CreateAccountInput, CreateClassInput, CreateGroupInput, JournalRepository,
    LedgerSettings,
};
use tallybook_shared::AppConfig;
use tallybook_shared::telemetry::init_tracing;
use tallybook_shared::types::{AccountClassId, AccountGroupId};
use tracing::info;

/// Accounts of a group: number, name, cost object rule.
type AccountSeed = &'static [(i32, &'static str, ObjectRequirement)];

/// Demo chart: class name, balance sheet flag, negated display, groups.
const CHART: &[(&str, bool, bool, &[(&str, AccountSeed)])] = &[
    (
        "Assets",
        true,
        false,
        &[
            (
                "Cash and bank",
                &[
                    (1000, "Cash", ObjectRequirement::Optional),
                    (1010, "Bank account", ObjectRequirement::Optional),
                ],
            ),
            (
                "Receivables",
                &[(1100, "Accounts receivable", ObjectRequirement::Optional)],
            ),
        ],
    ),
    (
        "Liabilities",
        true,
        true,
        &[("Payables", &[(2000, "Accounts payable", ObjectRequirement::Optional)])],
    ),
    (
        "Equity",
        true,
        true,
        &[("Capital", &[(3000, "Retained earnings", ObjectRequirement::Forbidden)])],
    ),
    (
        "Income",
        false,
        true,
        &[(
            "Revenue",
            &[
                (4000, "Registrations", ObjectRequirement::Optional),
                (4100, "Sponsorship", ObjectRequirement::Required),
            ],
        )],
    ),
    (
        "Expenses",
        false,
        false,
        &[(
            "Operating costs",
            &[
                (5000, "Venue", ObjectRequirement::Required),
                (5100, "Bank fees", ObjectRequirement::Forbidden),
            ],
        )],
    ),
];

/// Cost object created for the demo data.
const DEMO_OBJECT: &str = "Demo conference";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    init_tracing(&config.logging)?;

    let settings = LedgerSettings::from_config(&config.accounting)?;
    let db = tallybook_db::connect(&config.database).await?;
    info!("Connected to database");

    let chart = ChartRepository::new(db.clone());
    if chart.list_classes().await?.is_empty() {
        seed_chart(&chart).await?;
    } else {
        info!("Chart of accounts already exists, skipping");
    }

    if chart.list_objects(false).await?.iter().all(|o| o.name != DEMO_OBJECT) {
        chart.create_object(DEMO_OBJECT).await?;
        info!(name = DEMO_OBJECT, "Cost object created");
    }

    let journal = JournalRepository::new(db, settings);
    let today = chrono::Local::now().date_naive();
    let year = journal
        .get_year(settings.calendar.fiscal_year_of(today), today)
        .await?;
    info!(
        year = year.year,
        label = %settings.calendar.label(year.year),
        "Current fiscal year ready"
    );

    info!("Seeding complete");
    Ok(())
}

/// Creates the demo classes, groups and accounts.
async fn seed_chart(chart: &ChartRepository) -> anyhow::Result<()> {
    for &(class_name, in_balance, balance_negative, groups) in CHART {
        let class = chart
            .create_class(CreateClassInput {
                name: class_name.to_string(),
                in_balance,
                balance_negative,
            })
            .await?;

        for &(group_name, accounts) in groups {
            let group = chart
                .create_group(CreateGroupInput {
                    name: group_name.to_string(),
                    class_id: AccountClassId::from_uuid(class.id),
                    foldable: accounts.len() == 1,
                })
                .await?;

            for &(num, name, object_requirement) in accounts {
                chart
                    .create_account(CreateAccountInput {
                        num,
                        name: name.to_string(),
                        group_id: AccountGroupId::from_uuid(group.id),
                        available_for_invoicing: !in_balance,
                        object_requirement,
                    })
                    .await?;
            }
        }
        info!(class = class_name, "Account class seeded");
    }
    Ok(())
}
