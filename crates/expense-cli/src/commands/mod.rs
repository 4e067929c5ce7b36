//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, load_rules)
//! - `categories` - Category listing and creation
//! - `classify` - Classification preview
//! - `expenses` - Expense commands (add, list, delete, backfill)
//! - `reports` - Spending summary and period resolution
//! - `serve` - Web server command

pub mod categories;
pub mod classify;
pub mod core;
pub mod expenses;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use categories::*;
pub use classify::*;
pub use self::core::*;
pub use expenses::*;
pub use reports::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
