//! Category assignment for recorded expenses
//!
//! Bridges the pure classifier and the category store: the classifier picks a
//! name, the store upserts it, and the expense is saved with the resulting id.
//! Expenses that arrive with an explicit category skip classification.

use serde::Serialize;
use tracing::{debug, info};

use crate::classify::{Classification, RuleSet};
use crate::db::Database;
use crate::error::Result;
use crate::models::{classification_text, Category, Expense, NewExpense};

/// Result of a backfill operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackfillResult {
    pub expenses_processed: usize,
    pub expenses_categorized: usize,
    pub fallback_to_other: usize,
}

/// Assigns categories to expenses using a rule table and the category store
pub struct Categorizer<'a> {
    db: &'a Database,
    rules: &'a RuleSet,
}

impl<'a> Categorizer<'a> {
    pub fn new(db: &'a Database, rules: &'a RuleSet) -> Self {
        Self { db, rules }
    }

    /// Classify merchant/note text without touching the store
    pub fn preview(&self, merchant: &str, note: Option<&str>) -> Classification {
        self.rules.explain(&classification_text(merchant, note))
    }

    /// Classify and upsert the category for merchant/note text
    pub fn resolve_category(&self, merchant: &str, note: Option<&str>) -> Result<Category> {
        let name = self.rules.classify(&classification_text(merchant, note));
        let category = self.db.upsert_category(name)?;
        debug!(merchant, category = %category.name, "Resolved category");
        Ok(category)
    }

    /// Store an expense, classifying it first when no category is given
    pub fn record_expense(&self, mut new: NewExpense) -> Result<Expense> {
        new.validate()?;

        if new.category_id.is_none() {
            let category = self.resolve_category(&new.merchant, new.note.as_deref())?;
            new.category_id = Some(category.id);
        }

        let expense = self.db.create_expense(&new)?;
        info!(
            id = expense.id,
            amount = %expense.amount,
            category = expense.category.as_deref().unwrap_or("-"),
            "Recorded expense"
        );
        Ok(expense)
    }

    /// Categorize every stored expense that has no category yet
    pub fn backfill_uncategorized(&self) -> Result<BackfillResult> {
        let expenses = self.db.find_uncategorized_expenses()?;
        let mut result = BackfillResult {
            expenses_processed: expenses.len(),
            ..Default::default()
        };

        for expense in &expenses {
            let classification = self.rules.explain(&expense.classification_text());
            let category = self.db.upsert_category(&classification.category)?;
            self.db.set_expense_category(expense.id, category.id)?;

            result.expenses_categorized += 1;
            if classification.keyword.is_none() {
                result.fallback_to_other += 1;
            }
        }

        info!(
            processed = result.expenses_processed,
            categorized = result.expenses_categorized,
            fallback = result.fallback_to_other,
            "Backfilled expense categories"
        );
        Ok(result)
    }
}
