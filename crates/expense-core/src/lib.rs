//! Expense Tracker Core Library
//!
//! Shared functionality for the expense tracker:
//! - Keyword classification of merchant/note text into categories
//! - Category and expense stores on SQLite with migrations
//! - Spending summaries grouped by category over a date window
//! - Automatic categorization of recorded expenses

pub mod categorize;
pub mod classify;
pub mod db;
pub mod error;
pub mod models;
pub mod summary;

pub use categorize::{BackfillResult, Categorizer};
pub use classify::{classify, CategoryRule, Classification, RuleSet, FALLBACK_CATEGORY};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    Category, CategoryTotal, DateWindow, Expense, NewExpense, SummaryReport, UNCATEGORIZED,
};
pub use summary::summarize;
