//! Stats and health endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::super::error::ApiResult;
use super::super::AppState;
use crate::services::{journal_stats, JournalStats};

pub async fn api_stats(State(state): State<AppState>) -> ApiResult<Json<JournalStats>> {
    Ok(Json(journal_stats(&state.db).await?))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
