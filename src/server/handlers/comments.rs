//! Comment API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::super::auth::AdminSession;
use super::super::error::{ApiError, ApiResult};
use super::super::AppState;
use super::helpers::{json_body, IdQuery, PostIdQuery, SuccessResponse};
use crate::models::{Comment, CommentDraft};
use crate::repository::StoreError;

pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<PostIdQuery>,
) -> ApiResult<Json<Vec<Comment>>> {
    let post_id = query.require()?;
    Ok(Json(state.db.comments().list_for_post(&post_id).await?))
}

/// Visitors may comment without a session.
pub async fn create_comment(
    State(state): State<AppState>,
    payload: Result<Json<CommentDraft>, JsonRejection>,
) -> ApiResult<Json<Comment>> {
    let draft = json_body(payload)?;
    match state.db.comments().create(&draft).await {
        Ok(comment) => Ok(Json(comment)),
        Err(StoreError::NotFound) => Err(ApiError::not_found("Post not found")),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_comment(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = query.require("Comment")?;
    if !state.db.comments().delete(&id).await? {
        return Err(ApiError::not_found("Comment not found"));
    }
    Ok(SuccessResponse::ok())
}
