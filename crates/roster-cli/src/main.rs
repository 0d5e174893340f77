//! Duty roster command-line tool
//!
//! Maintenance and inspection of stored rosters.

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::config::AppConfig;
use roster_db::{Database, Pagination, PgDutyScheduleRepository};
use roster_engine::Clock;
use roster_services::{load_reference_data, DutyScheduleService, RosterContext, RosterSession, ServiceResult};

mod command;

use command::{Cli, Command};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Connected to database");

    let repo = Arc::new(PgDutyScheduleRepository::new(db.pool().clone()));
    let service = DutyScheduleService::new(repo, config.roster.create_scope);

    let outcome = run(cli.command, &db, service, &config).await;
    db.close().await;
    outcome
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,roster_services=debug,roster_db=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(command: Command, db: &Database, service: DutyScheduleService, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Migrate => {
            db.ensure_schema().await?;
            println!("Schema ready");
        }
        Command::List { page, per_page } => {
            let result = service.list(Pagination::page(page, per_page)).await?;
            for schedule in &result.items {
                println!(
                    "{:>6}  {:<16} {} .. {}  {:>4} assignments{}",
                    schedule.id.unwrap_or_default(),
                    schedule.name,
                    schedule.start_date,
                    schedule.end_date,
                    schedule.assignment_count(),
                    if schedule.is_finalized { "  [finalized]" } else { "" },
                );
            }
            println!("page {} of {} ({} total)", result.page(), result.total_pages().max(1), result.total);
        }
        Command::Show { id } => {
            let refs = load_reference_data(config.roster.reference_file.as_deref())?;
            let context = RosterContext::from_config(&config.roster, refs)?;
            let clock: Arc<dyn Clock> = Arc::new(context.clock());
            let session = RosterSession::open(service, clock, context, id).await?;
            print_roster(&session);
        }
        Command::Finalize { id } => report(service.set_finalized(id, true).await)?,
        Command::Reopen { id } => report(service.set_finalized(id, false).await)?,
        Command::Delete { id } => report(service.delete(id).await)?,
    }
    Ok(())
}

fn report<T>(result: ServiceResult<T>) -> anyhow::Result<()> {
    if result.is_failure() {
        bail!(result.notification_text());
    }
    println!("{}", result.notification_text());
    Ok(())
}

fn print_roster(session: &RosterSession) {
    let state = session.state();
    let period = state.period();
    println!(
        "{} ({} .. {}){}",
        state.name(),
        period.start_date,
        period.end_date,
        if state.is_finalized() { " [finalized]" } else { "" }
    );

    let grid = session.grid();
    println!();
    println!("{}", WEEKDAYS.map(|d| format!("{:<5}", d)).concat());
    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let mark = if day.is_holiday() {
                        '*'
                    } else if day.is_weekend {
                        '.'
                    } else {
                        ' '
                    };
                    format!("{:>2}{}  ", day.date.format("%d"), mark)
                }
                None => "     ".to_string(),
            })
            .collect();
        println!("{}", row.trim_end());
    }
    println!("(* holiday, . weekend)");

    for day in &grid.days {
        let assignments = session.assignments_on(day.date);
        if assignments.is_empty() {
            continue;
        }
        match &day.holiday {
            Some(name) => println!("\n{} {}  {}", WEEKDAYS[day.weekday_index], day.key, name),
            None => println!("\n{} {}", WEEKDAYS[day.weekday_index], day.key),
        }
        for assignment in assignments {
            println!(
                "  {:<24} #{:<6} {:<16} {}{}",
                assignment.employee_name,
                assignment.employee_id.map(|id| id.to_string()).unwrap_or_default(),
                assignment.shift_label,
                assignment.shift_time_range,
                assignment
                    .remarks
                    .as_deref()
                    .map(|r| format!("  ({})", r))
                    .unwrap_or_default(),
            );
        }
    }
}
