//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod categories;
pub mod classify;
pub mod expenses;
pub mod health;
pub mod reports;

// Re-export all handlers for use in router
pub use categories::*;
pub use classify::*;
pub use expenses::*;
pub use health::*;
pub use reports::*;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppError;
use expense_core::DateWindow;

/// Query parameters for date-windowed endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRangeQuery {
    /// Parse both bounds and reject a reversed window
    pub fn window(&self) -> Result<DateWindow, AppError> {
        let from = parse_optional_date(self.from.as_deref())
            .map_err(|_| AppError::bad_request("Invalid from date format (use YYYY-MM-DD)"))?;
        let to = parse_optional_date(self.to.as_deref())
            .map_err(|_| AppError::bad_request("Invalid to date format (use YYYY-MM-DD)"))?;

        let window = DateWindow::new(from, to);
        window.validate()?;
        Ok(window)
    }
}

/// Empty strings count as "not given" so `?from=&to=` behaves like no filter
fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
}
