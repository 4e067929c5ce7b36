//! Category store operations

use std::collections::HashMap;

use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::Category;

/// Categories created by `init` so pickers have something to show
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Groceries",
    "Restaurants",
    "Transport",
    "Utilities",
    "Shopping",
    "Health",
    "Entertainment",
    "Other",
];

fn normalize_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidData("category name is required".to_string()));
    }
    Ok(name)
}

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    let created_at_str: String = row.get(2)?;
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Seed the default categories (idempotent - skips existing names)
    pub fn seed_default_categories(&self) -> Result<usize> {
        let conn = self.conn()?;
        let mut created = 0;

        for name in DEFAULT_CATEGORIES {
            created += conn.execute(
                "INSERT INTO categories (name) VALUES (?) ON CONFLICT(name) DO NOTHING",
                params![name],
            )?;
        }

        info!(created, "Seeded default categories");
        Ok(created)
    }

    /// Create a category, failing if the name is already taken
    pub fn create_category(&self, name: &str) -> Result<Category> {
        let name = normalize_name(name)?;
        let conn = self.conn()?;

        let inserted = conn.execute(
            "INSERT INTO categories (name) VALUES (?) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        if inserted == 0 {
            return Err(Error::Conflict(format!("category '{}' already exists", name)));
        }

        let id = conn.last_insert_rowid();
        debug!(id, name, "Created category");

        self.get_category(id)?
            .ok_or_else(|| Error::NotFound(format!("category {}", id)))
    }

    /// Return the category with this name, creating it if absent
    ///
    /// The UNIQUE constraint on `name` makes the insert a no-op when another
    /// caller created the row first, so at most one row ever exists per name.
    pub fn upsert_category(&self, name: &str) -> Result<Category> {
        let name = normalize_name(name)?;
        let conn = self.conn()?;

        let inserted = conn.execute(
            "INSERT INTO categories (name) VALUES (?) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        if inserted > 0 {
            info!(name, "Created category on first use");
        }

        let category = conn.query_row(
            "SELECT id, name, created_at FROM categories WHERE name = ?",
            params![name],
            row_to_category,
        )?;

        Ok(category)
    }

    /// Get a category by ID
    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, created_at FROM categories WHERE id = ?",
                params![id],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Get a category by exact name
    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, created_at FROM categories WHERE name = ?",
                params![name.trim()],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// List all categories ordered by name
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM categories ORDER BY name")?;

        let categories = stmt
            .query_map([], row_to_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Category id to name lookup used for reports
    pub fn category_names(&self) -> Result<HashMap<i64, String>> {
        Ok(self
            .list_categories()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect())
    }
}
