//! Expense CLI - Personal expense tracker
//!
//! Usage:
//!   expense init                          Initialize database
//!   expense add 12.50 Starbucks           Record an expense (auto-categorized)
//!   expense report --period this-month    Spending by category
//!   expense serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let rules_path = cli.rules.as_deref();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            amount,
            merchant,
            date,
            note,
            category,
        } => {
            let db = commands::open_db(&cli.db)?;
            let rules = commands::load_rules(rules_path)?;
            commands::cmd_add(
                &db,
                &rules,
                &amount,
                &merchant,
                date.as_deref(),
                note.as_deref(),
                category.as_deref(),
            )
        }
        Commands::List { from, to } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, from.as_deref(), to.as_deref())
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Add { name }) => commands::cmd_categories_add(&db, &name),
            }
        }
        Commands::Classify { merchant, note } => {
            let rules = commands::load_rules(rules_path)?;
            commands::cmd_classify(&rules, &merchant, note.as_deref())
        }
        Commands::Backfill => {
            let db = commands::open_db(&cli.db)?;
            let rules = commands::load_rules(rules_path)?;
            commands::cmd_backfill(&db, &rules)
        }
        Commands::Report {
            period,
            from,
            to,
            json,
        } => {
            let db = commands::open_db(&cli.db)?;
            let window = commands::resolve_period(&period, from.as_deref(), to.as_deref())?;
            commands::cmd_report(&db, &window, json)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let rules = commands::load_rules(rules_path)?;
            commands::cmd_serve(&cli.db, rules, &host, port, static_dir.as_deref()).await
        }
    }
}
