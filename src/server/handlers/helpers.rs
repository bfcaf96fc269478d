//! Helper types and utility functions for handlers.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::ConnectInfo;
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::error::{ApiError, ApiResult};

/// `?id=` query used by the delete endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn require(self, what: &str) -> ApiResult<String> {
        non_empty(self.id).ok_or_else(|| ApiError::bad_request(format!("{} ID required", what)))
    }
}

/// `?postId=` query used by comments and likes.
#[derive(Debug, Default, Deserialize)]
pub struct PostIdQuery {
    #[serde(rename = "postId", alias = "post_id")]
    pub post_id: Option<String>,
}

impl PostIdQuery {
    pub fn require(self) -> ApiResult<String> {
        non_empty(self.post_id).ok_or_else(|| ApiError::bad_request("Post ID required"))
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Unwrap a JSON body, turning extractor rejections into `400` API errors.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Identify a visitor by user agent.
pub fn client_user_agent(headers: &HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Best-effort client address: proxy headers first, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
