//! Expense store operations

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{DateWindow, Expense, NewExpense};

const EXPENSE_COLUMNS: &str = "e.id, e.amount, e.date, e.merchant, e.note, e.category_id, c.name, e.created_at";

/// Raw expense columns, checked before they become an `Expense`
struct ExpenseRow {
    id: i64,
    amount: Value,
    date: Option<String>,
    merchant: String,
    note: Option<String>,
    category_id: Option<i64>,
    category: Option<String>,
    created_at: String,
}

impl ExpenseRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            amount: row.get(1)?,
            date: row.get(2)?,
            merchant: row.get(3)?,
            note: row.get(4)?,
            category_id: row.get(5)?,
            category: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn into_expense(self) -> Result<Expense> {
        let amount = match self.amount {
            Value::Text(ref s) => Decimal::from_str(s.trim()).map_err(|_| {
                Error::InvalidRecord(format!("expense {} has non-numeric amount '{}'", self.id, s))
            })?,
            Value::Integer(i) => Decimal::from(i),
            Value::Real(f) => Decimal::try_from(f).map_err(|_| {
                Error::InvalidRecord(format!("expense {} has non-numeric amount {}", self.id, f))
            })?,
            Value::Null => {
                return Err(Error::InvalidRecord(format!(
                    "expense {} has no amount",
                    self.id
                )))
            }
            Value::Blob(_) => {
                return Err(Error::InvalidRecord(format!(
                    "expense {} has non-numeric amount",
                    self.id
                )))
            }
        };

        let date = match self.date.as_deref() {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                Error::InvalidRecord(format!("expense {} has invalid date '{}'", self.id, s))
            })?,
            None => {
                return Err(Error::InvalidRecord(format!(
                    "expense {} has no date",
                    self.id
                )))
            }
        };

        Ok(Expense {
            id: self.id,
            amount,
            date,
            merchant: self.merchant,
            note: self.note,
            category_id: self.category_id,
            category: self.category,
            created_at: parse_datetime(&self.created_at),
        })
    }
}

/// Direction for range queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    NewestFirst,
    OldestFirst,
}

impl Database {
    /// Insert an expense and return the stored row
    pub fn create_expense(&self, new: &NewExpense) -> Result<Expense> {
        new.validate()?;

        if let Some(category_id) = new.category_id {
            if self.get_category(category_id)?.is_none() {
                return Err(Error::NotFound(format!("category {}", category_id)));
            }
        }

        let id = {
            let conn = self.conn()?;
            conn.execute(
                r#"
                INSERT INTO expenses (amount, date, merchant, note, category_id)
                VALUES (?, ?, ?, ?, ?)
                "#,
                params![
                    new.amount.to_string(),
                    new.date.to_string(),
                    new.merchant.trim(),
                    new.note,
                    new.category_id,
                ],
            )?;
            conn.last_insert_rowid()
        };

        debug!(id, amount = %new.amount, category_id = ?new.category_id, "Inserted expense");

        self.get_expense(id)?
            .ok_or_else(|| Error::NotFound(format!("expense {}", id)))
    }

    /// Get a single expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM expenses e LEFT JOIN categories c ON c.id = e.category_id WHERE e.id = ?",
            EXPENSE_COLUMNS
        );

        let row = conn
            .query_row(&sql, params![id], ExpenseRow::from_row)
            .optional()?;

        row.map(ExpenseRow::into_expense).transpose()
    }

    /// Expenses inside the window, newest first
    pub fn find_expenses_in_range(&self, window: &DateWindow) -> Result<Vec<Expense>> {
        self.query_expenses(window, DateOrder::NewestFirst)
    }

    /// Expenses inside the window in the order they happened
    pub fn find_expenses_chronological(&self, window: &DateWindow) -> Result<Vec<Expense>> {
        self.query_expenses(window, DateOrder::OldestFirst)
    }

    /// Expenses that have never been given a category
    pub fn find_uncategorized_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM expenses e LEFT JOIN categories c ON c.id = e.category_id
             WHERE e.category_id IS NULL ORDER BY e.date, e.id",
            EXPENSE_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], ExpenseRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ExpenseRow::into_expense).collect()
    }

    /// Attach a category to an existing expense
    pub fn set_expense_category(&self, id: i64, category_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE expenses SET category_id = ? WHERE id = ?",
            params![category_id, id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }

    /// Delete an expense
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        debug!(id, "Deleted expense");
        Ok(())
    }

    /// Count stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    fn query_expenses(&self, window: &DateWindow, order: DateOrder) -> Result<Vec<Expense>> {
        window.validate()?;

        let mut conditions = Vec::new();
        let mut query_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(from) = window.from {
            conditions.push("e.date >= ?");
            query_params.push(Box::new(from.to_string()));
        }
        if let Some(to) = window.to {
            conditions.push("e.date <= ?");
            query_params.push(Box::new(to.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let order_clause = match order {
            DateOrder::NewestFirst => "ORDER BY e.date DESC, e.id DESC",
            DateOrder::OldestFirst => "ORDER BY e.date ASC, e.id ASC",
        };

        let sql = format!(
            "SELECT {} FROM expenses e LEFT JOIN categories c ON c.id = e.category_id {} {}",
            EXPENSE_COLUMNS, where_clause, order_clause
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            query_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), ExpenseRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ExpenseRow::into_expense).collect()
    }
}
