//! Editor preview for post content.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::auth::AdminSession;
use super::super::error::ApiResult;
use super::helpers::json_body;
use crate::content::format_content;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}

pub async fn preview_content(
    _admin: AdminSession,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> ApiResult<Json<PreviewResponse>> {
    let request = json_body(payload)?;
    Ok(Json(PreviewResponse {
        html: format_content(&request.content),
    }))
}
