//! Spending reports over stored expenses

use super::Database;
use crate::error::Result;
use crate::models::{DateWindow, SummaryReport};
use crate::summary::summarize;

impl Database {
    /// Spending summary for the window, grouped by category
    ///
    /// Expenses are read oldest first, so categories appear in the order they
    /// were first spent in.
    pub fn spending_summary(&self, window: &DateWindow) -> Result<SummaryReport> {
        window.validate()?;

        let expenses = self.find_expenses_chronological(window)?;
        let names = self.category_names()?;

        summarize(&expenses, &names, window)
    }
}
