//! Classification preview handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{AppError, AppState};
use expense_core::{Categorizer, Classification};

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub merchant: String,
    pub note: Option<String>,
}

/// POST /api/classify - Show which category an expense would get (no writes)
pub async fn classify_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<Classification>, AppError> {
    let classification =
        Categorizer::new(&state.db, &state.rules).preview(&req.merchant, req.note.as_deref());
    Ok(Json(classification))
}
