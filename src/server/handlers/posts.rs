//! Game post API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::auth::AdminSession;
use super::super::error::{ApiError, ApiResult};
use super::super::AppState;
use super::helpers::{json_body, IdQuery, SuccessResponse};
use crate::models::{NewGamePost, PostWithMedia};

/// All posts, newest first, with media.
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostWithMedia>>> {
    Ok(Json(state.db.posts().list_with_media(None).await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostWithMedia>> {
    state
        .db
        .posts()
        .get_with_media(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Post not found"))
}

pub async fn create_post(
    _admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<NewGamePost>, JsonRejection>,
) -> ApiResult<Json<PostWithMedia>> {
    let draft = json_body(payload)?;
    let created = state.db.posts().create(&draft).await?;
    tracing::info!("Created post {} ({})", created.post.id, created.post.game);
    Ok(Json(created))
}

pub async fn delete_post(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = query.require("Post")?;
    if !state.db.posts().delete(&id).await? {
        return Err(ApiError::not_found("Post not found"));
    }
    tracing::info!("Deleted post {}", id);
    Ok(SuccessResponse::ok())
}

#[derive(Debug, Deserialize)]
pub struct PatchQuery {
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FixMediaResponse {
    pub message: String,
    pub fixed_count: usize,
}

/// Maintenance actions; only `fix-media-types` exists.
pub async fn patch_posts(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<PatchQuery>,
) -> ApiResult<Json<FixMediaResponse>> {
    match query.action.as_deref() {
        Some("fix-media-types") => {
            let fixed_count = state.media.reclassify_all().await?;
            Ok(Json(FixMediaResponse {
                message: format!("Fixed {} media items", fixed_count),
                fixed_count,
            }))
        }
        _ => Err(ApiError::bad_request("Invalid action")),
    }
}
