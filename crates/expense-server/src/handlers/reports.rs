//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use super::DateRangeQuery;
use crate::{AppError, AppState};
use expense_core::models::SummaryReport;

/// GET /api/reports/summary - Spending totals grouped by category
pub async fn report_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Json<SummaryReport>, AppError> {
    let window = params.window()?;
    let report = state.db.spending_summary(&window)?;

    debug!(
        from = ?window.from,
        to = ?window.to,
        groups = report.by_category.len(),
        "Served spending summary"
    );

    Ok(Json(report))
}
