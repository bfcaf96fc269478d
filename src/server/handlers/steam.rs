//! Steam Web API proxy.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::super::error::{ApiError, ApiResult};
use super::super::AppState;
use crate::services::SteamParams;

#[derive(Debug, Deserialize)]
pub struct EndpointQuery {
    pub endpoint: Option<String>,
}

/// Forward `?endpoint=` (plus optional `steamid`, `vanityurl`, `appid`) to Steam.
pub async fn steam_proxy(
    State(state): State<AppState>,
    Query(query): Query<EndpointQuery>,
    Query(params): Query<SteamParams>,
) -> ApiResult<Json<Value>> {
    let endpoint = query
        .endpoint
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Endpoint required"))?;
    Ok(Json(state.steam.call(&endpoint, &params).await?))
}
