//! Domain models for the expense tracker

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Label used in reports for expenses with no (or an unknown) category.
///
/// Not a stored category, unlike the classifier fallback "Other".
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Unique, non-empty
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub merchant: String,
    pub note: Option<String>,
    pub category_id: Option<i64>,
    /// Resolved category name (populated by store reads that join categories)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Text the classifier sees for this expense
    pub fn classification_text(&self) -> String {
        classification_text(&self.merchant, self.note.as_deref())
    }
}

/// Merchant and note joined the way auto-categorization expects
pub fn classification_text(merchant: &str, note: Option<&str>) -> String {
    format!("{} {}", merchant, note.unwrap_or(""))
}

/// An expense waiting to be inserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub merchant: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl NewExpense {
    /// Check the fields the store refuses to persist
    pub fn validate(&self) -> Result<()> {
        if self.merchant.trim().is_empty() {
            return Err(Error::InvalidData("merchant is required".to_string()));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "amount must not be negative (got {})",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Optional inclusive date range used to filter expenses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Window with no bounds (every date is included)
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Reject windows whose start is after their end
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(Error::InvalidRange { from, to });
            }
        }
        Ok(())
    }

    /// Both bounds inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Spending for one category in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Per-category spending summary, computed on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total: Decimal,
    pub by_category: Vec<CategoryTotal>,
}

impl SummaryReport {
    pub fn empty() -> Self {
        Self {
            total: Decimal::ZERO,
            by_category: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}
