//! Static asset handlers.

use axum::http::header;
use axum::response::IntoResponse;

use super::super::assets;

pub async fn serve_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        assets::CSS,
    )
}
