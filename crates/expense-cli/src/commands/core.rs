//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_rules` - Resolve the classification rule table
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use expense_core::{classify::default_rules_path, Database, RuleSet};

/// Open (and migrate) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Load classification rules from an explicit file, the data dir, or the built-in table
pub fn load_rules(explicit: Option<&Path>) -> Result<RuleSet> {
    RuleSet::load(explicit).context("Failed to load classification rules")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    let created = db
        .seed_default_categories()
        .context("Failed to seed default categories")?;
    println!("   Seeded {} default categories", created);

    match default_rules_path() {
        Some(path) if path.exists() => {
            println!("   📄 Rules override: {}", path.display());
        }
        Some(path) => {
            println!("   📄 Rules: built-in (override with {})", path.display());
        }
        None => println!("   📄 Rules: built-in"),
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: expense add 12.50 Starbucks");
    println!("  2. See where it went: expense report");
    println!("  3. Start web UI: expense serve");

    Ok(())
}
