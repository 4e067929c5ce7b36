//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Expense tracker - record spending and see where it goes
#[derive(Parser)]
#[command(name = "expense")]
#[command(about = "Personal expense tracker with automatic categorization", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, env = "EXPENSE_DB", default_value = "expenses.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Classification rules file (TOML)
    ///
    /// Without this flag, rules.toml in the data directory is used if present,
    /// otherwise the built-in rule table.
    #[arg(long, env = "EXPENSE_RULES", global = true)]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Record an expense
    Add {
        /// Amount spent (e.g. 12.50)
        amount: String,

        /// Merchant name
        merchant: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note (also used for classification)
        #[arg(short, long)]
        note: Option<String>,

        /// Category name (classified automatically if omitted)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Show which category some text would be given
    Classify {
        /// Merchant name
        merchant: String,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Categorize stored expenses that have no category
    Backfill,

    /// Spending summary by category
    Report {
        /// Period: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all
        #[arg(short, long, default_value = "all")]
        period: String,

        /// Custom start date (YYYY-MM-DD), overrides --period
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD), overrides --period
        #[arg(long)]
        to: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a new category
    Add {
        /// Category name
        name: String,
    },
}
