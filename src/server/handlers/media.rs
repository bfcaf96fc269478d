//! Media library API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::super::auth::AdminSession;
use super::super::error::ApiResult;
use super::super::AppState;
use super::helpers::{json_body, IdQuery, SuccessResponse};
use crate::models::{GalleryItem, MediaUpload};

pub async fn list_media(State(state): State<AppState>) -> ApiResult<Json<Vec<GalleryItem>>> {
    Ok(Json(state.db.media().gallery(None, None).await?))
}

/// Upload a standalone media item; its kind comes from the URL when recognisable.
pub async fn upload_media(
    _admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<MediaUpload>, JsonRejection>,
) -> ApiResult<Json<GalleryItem>> {
    let upload = json_body(payload)?;
    let uploaded = state.media.upload(&upload).await?;
    if uploaded.reclassified {
        tracing::debug!(
            "Media {} stored as {} instead of {}",
            uploaded.item.id,
            uploaded.item.kind,
            upload.kind
        );
    }
    Ok(Json(uploaded.item))
}

pub async fn delete_media(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = query.require("Media")?;
    let deletion = state.media.delete(&id).await?;
    if deletion.removed_post {
        tracing::info!("Deleted media {} and its media post", id);
    }
    Ok(SuccessResponse::ok())
}
