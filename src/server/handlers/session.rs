//! Admin login and logout.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use super::super::auth::SessionToken;
use super::super::error::ApiResult;
use super::super::AppState;
use super::helpers::{json_body, SuccessResponse};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// Exchange the admin password for a session token and cookie.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = json_body(payload)?;
    let session: SessionToken = match state.auth.login(&request.password, Utc::now()) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Admin login rejected: {}", e);
            return Err(e.into());
        }
    };

    let cookie = state.auth.session_cookie(&session);
    Ok(([(SET_COOKIE, cookie)], Json(session)))
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    ([(SET_COOKIE, state.auth.clear_cookie())], SuccessResponse::ok())
}
