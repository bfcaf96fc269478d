//! Quick rant API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::super::auth::AdminSession;
use super::super::error::{ApiError, ApiResult};
use super::super::AppState;
use super::helpers::{json_body, IdQuery, SuccessResponse};
use crate::models::{NewQuickRant, QuickRant};

pub async fn list_rants(State(state): State<AppState>) -> ApiResult<Json<Vec<QuickRant>>> {
    Ok(Json(state.db.rants().list(None).await?))
}

pub async fn create_rant(
    _admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<NewQuickRant>, JsonRejection>,
) -> ApiResult<Json<QuickRant>> {
    let draft = json_body(payload)?;
    Ok(Json(state.db.rants().create(&draft).await?))
}

pub async fn delete_rant(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = query.require("Rant")?;
    if !state.db.rants().delete(&id).await? {
        return Err(ApiError::not_found("Rant not found"));
    }
    Ok(SuccessResponse::ok())
}
