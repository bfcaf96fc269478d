//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::home))
        .route("/games", get(handlers::games))
        .route("/games/:id", get(handlers::game_detail))
        .route("/gallery", get(handlers::gallery))
        // Posts; deletes and maintenance take their target from the query
        .route(
            "/api/posts",
            get(handlers::list_posts)
                .post(handlers::create_post)
                .delete(handlers::delete_post)
                .patch(handlers::patch_posts),
        )
        .route("/api/posts/:id", get(handlers::get_post))
        .route(
            "/api/media",
            get(handlers::list_media)
                .post(handlers::upload_media)
                .delete(handlers::delete_media),
        )
        .route(
            "/api/comments",
            get(handlers::list_comments)
                .post(handlers::create_comment)
                .delete(handlers::delete_comment),
        )
        .route(
            "/api/likes",
            get(handlers::get_likes).post(handlers::toggle_like),
        )
        .route(
            "/api/rants",
            get(handlers::list_rants)
                .post(handlers::create_rant)
                .delete(handlers::delete_rant),
        )
        .route("/api/steam", get(handlers::steam_proxy))
        .route("/api/preview", post(handlers::preview_content))
        .route("/api/stats", get(handlers::api_stats))
        // Admin session
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/health", get(handlers::health))
        .route("/static/style.css", get(handlers::serve_css))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
