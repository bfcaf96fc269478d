//! Like API endpoints. Visitors are identified by user agent.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use super::super::error::{ApiError, ApiResult};
use super::super::AppState;
use super::helpers::{client_ip, client_user_agent, json_body, PostIdQuery};
use crate::models::{LikeStatus, LikeToggle};

pub async fn get_likes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PostIdQuery>,
) -> ApiResult<Json<LikeStatus>> {
    let post_id = query.require()?;
    let user_agent = client_user_agent(&headers);
    Ok(Json(state.db.likes().status(&post_id, &user_agent).await?))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<LikeToggle>, JsonRejection>,
) -> ApiResult<Json<LikeStatus>> {
    let toggle = json_body(payload)?;
    if toggle.post_id.trim().is_empty() {
        return Err(ApiError::bad_request("Post ID required"));
    }

    let user_agent = client_user_agent(&headers);
    let ip_address = client_ip(&headers, peer.as_ref());
    let status = state
        .db
        .likes()
        .toggle(&toggle.post_id, &user_agent, &ip_address)
        .await?;
    Ok(Json(status))
}
