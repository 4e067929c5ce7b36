//! Expense handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::DateRangeQuery;
use crate::{AppError, AppState};
use expense_core::models::{Expense, NewExpense};
use expense_core::{BackfillResult, Categorizer};

/// GET /api/expenses - Expenses in an optional date window, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let window = params.window()?;
    let expenses = state.db.find_expenses_in_range(&window)?;
    Ok(Json(expenses))
}

/// Request body for recording an expense
///
/// Fields are loose so that missing or mistyped values come back as a 400
/// with a useful message instead of a generic extractor rejection.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: Option<Value>,
    pub date: Option<String>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub category_id: Option<Value>,
}

impl CreateExpenseRequest {
    fn into_new_expense(self) -> Result<NewExpense, AppError> {
        let amount = match self.amount {
            Some(value) => parse_amount(&value)?,
            None => return Err(AppError::bad_request("amount is required")),
        };

        let date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::bad_request("date is required"))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?;

        let merchant = self
            .merchant
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::bad_request("merchant is required"))?;

        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let category_id = match self.category_id {
            Some(value) => parse_category_id(&value)?,
            None => None,
        };

        Ok(NewExpense {
            amount,
            date,
            merchant,
            note,
            category_id,
        })
    }
}

/// Accept a JSON number or a numeric string, keeping the decimal digits as written
fn parse_amount(value: &Value) -> Result<Decimal, AppError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(AppError::bad_request("amount must be a number")),
    };

    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| AppError::bad_request("amount must be a number"))?;

    if amount < Decimal::ZERO {
        return Err(AppError::bad_request("amount must not be negative"));
    }
    Ok(amount)
}

/// `null` means no category; numeric strings are accepted like they are for `amount`
fn parse_category_id(value: &Value) -> Result<Option<i64>, AppError> {
    let id = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.map(Some)
        .ok_or_else(|| AppError::bad_request("category_id must be an integer"))
}

/// POST /api/expenses - Record an expense, classifying it when no category is given
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let new = req.into_new_expense()?;

    if let Some(category_id) = new.category_id {
        if state.db.get_category(category_id)?.is_none() {
            return Err(AppError::bad_request("Unknown category_id"));
        }
    }

    let expense = Categorizer::new(&state.db, &state.rules).record_expense(new)?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.db.get_expense(id)?.is_none() {
        return Err(AppError::not_found("Expense not found"));
    }

    state.db.delete_expense(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/expenses/backfill - Categorize stored expenses that have no category
pub async fn backfill_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BackfillResult>, AppError> {
    let result = Categorizer::new(&state.db, &state.rules).backfill_uncategorized()?;
    Ok(Json(result))
}
