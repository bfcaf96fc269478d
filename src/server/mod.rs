//! Web server for the gaming journal.
//!
//! Serves the public pages (home, games, post detail, gallery) and the JSON
//! API used by the admin editor and visitor interactions (comments, likes).

mod assets;
pub mod auth;
mod cache;
pub mod error;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::repository::DbContext;
use crate::services::{MediaLibrary, SteamClient};

use auth::Authenticator;
use cache::SteamCache;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub db: DbContext,
    pub media: MediaLibrary,
    pub steam: Arc<SteamClient>,
    pub steam_cache: Arc<SteamCache>,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db = settings.create_db_context();
        let steam = SteamClient::new(settings.steam.clone())?;
        if !settings.steam.is_configured() {
            tracing::info!("Steam API key not configured; Steam widget disabled");
        }

        let auth = Authenticator::new(
            settings.admin_password_hash.clone(),
            settings.session_secret_or_random(),
            settings.session_ttl_hours,
            settings.secure_cookies,
        );
        if !auth.is_configured() {
            tracing::warn!("No admin_password_hash configured; admin login is disabled");
        }

        Ok(Self::from_parts(db, steam, auth))
    }

    pub fn from_parts(db: DbContext, steam: SteamClient, auth: Authenticator) -> Self {
        Self {
            media: MediaLibrary::new(db.clone()),
            db,
            steam: Arc::new(steam),
            steam_cache: Arc::new(SteamCache::new()),
            auth: Arc::new(auth),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    state.db.init_schema().await?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_context;
    use crate::services::SteamConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use chrono::Utc;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        token: String,
        _dir: TempDir,
    }

    async fn setup_test_app() -> TestApp {
        let (db, dir) = test_context().await;
        let hash = auth::hash_password("hunter2").unwrap();
        let auth = Authenticator::new(Some(hash), "test-secret", 12, false);
        let token = auth.issue(Utc::now()).unwrap().token;
        let steam = SteamClient::new(SteamConfig::default()).unwrap();
        TestApp {
            router: create_router(AppState::from_parts(db, steam, auth)),
            token,
            _dir: dir,
        }
    }

    impl TestApp {
        async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, body.to_vec())
        }

        async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
            let (status, body) = self.send(request).await;
            let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            (status, value)
        }

        fn admin(&self, method: &str, uri: &str, body: Value) -> Request<Body> {
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::USER_AGENT, "test-agent")
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::USER_AGENT, "test-agent")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn sample_post() -> Value {
        json!({
            "title": "Finally beat Malenia",
            "game": "Elden Ring",
            "platform": "PC",
            "content": "**Took** forever\n- phase one\n- phase two",
            "playtime": "120 hours",
            "rating": 5,
            "mood": "excited",
            "mediaItems": [
                {"type": "screenshot", "url": "https://youtu.be/abc123", "caption": "the fight"}
            ]
        })
    }

    async fn create_sample(app: &TestApp) -> String {
        let (status, body) = app.json(app.admin("POST", "/api/posts", sample_post())).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = setup_test_app().await;
        let (status, _) = app.send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_fetch_post() {
        let app = setup_test_app().await;
        let id = create_sample(&app).await;

        let (status, body) = app.json(get(&format!("/api/posts/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["game"], "Elden Ring");
        assert_eq!(body["media_items"][0]["type"], "youtube");

        let (status, body) = app.json(get("/api/posts")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = app.json(get("/api/posts/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Post not found");
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let app = setup_test_app().await;

        let (status, body) = app.json(post_json("/api/posts", sample_post())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());

        let forged = Request::builder()
            .method("DELETE")
            .uri("/api/rants?id=x")
            .header(header::COOKIE, "gamelog_session=123.abcd")
            .body(Body::empty())
            .unwrap();
        let (status, _) = app.send(forged).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_post_rejected() {
        let app = setup_test_app().await;
        let mut draft = sample_post();
        draft["rating"] = json!(9);
        let (status, _) = app.json(app.admin("POST", "/api/posts", draft)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let malformed = Request::builder()
            .method("POST")
            .uri("/api/posts")
            .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = app.json(malformed).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_delete_post() {
        let app = setup_test_app().await;
        let id = create_sample(&app).await;

        let (status, body) = app
            .json(app.admin("DELETE", "/api/posts", Value::Null))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Post ID required");

        let uri = format!("/api/posts?id={}", id);
        let (status, body) = app.json(app.admin("DELETE", &uri, Value::Null)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = app.json(app.admin("DELETE", &uri, Value::Null)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_actions() {
        let app = setup_test_app().await;
        create_sample(&app).await;

        let (status, body) = app
            .json(app.admin("PATCH", "/api/posts?action=fix-media-types", Value::Null))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fixed_count"], 0);
        assert_eq!(body["message"], "Fixed 0 media items");

        let (status, _) = app
            .json(app.admin("PATCH", "/api/posts?action=explode", Value::Null))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_comments_flow() {
        let app = setup_test_app().await;
        let id = create_sample(&app).await;

        let (status, body) = app
            .json(post_json(
                "/api/comments",
                json!({"username": "  visitor ", "content": "gg", "postId": id}),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "visitor");

        let (status, _) = app
            .json(post_json(
                "/api/comments",
                json!({"username": "v", "content": "gg", "postId": "missing"}),
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .json(post_json(
                "/api/comments",
                json!({"username": "v", "content": "x".repeat(1001), "postId": id}),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app.json(get(&format!("/api/comments?postId={}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = app.json(get("/api/comments")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_like_toggle() {
        let app = setup_test_app().await;
        let id = create_sample(&app).await;

        let (status, body) = app
            .json(post_json("/api/likes", json!({"postId": id})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["liked"], true);
        assert_eq!(body["like_count"], 1);

        let (_, body) = app.json(get(&format!("/api/likes?postId={}", id))).await;
        assert_eq!(body["liked"], true);

        let (_, body) = app
            .json(post_json("/api/likes", json!({"postId": id})))
            .await;
        assert_eq!(body["liked"], false);
        assert_eq!(body["like_count"], 0);
    }

    #[tokio::test]
    async fn test_media_upload_and_gallery() {
        let app = setup_test_app().await;

        let upload = json!({
            "url": "https://example.com/clip.mp4",
            "caption": "Speedrun",
            "game": "Celeste",
            "type": "screenshot"
        });
        let (status, body) = app.json(app.admin("POST", "/api/media", upload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "video");
        let media_id = body["id"].as_str().unwrap().to_string();

        let (_, posts) = app.json(get("/api/posts")).await;
        assert_eq!(posts[0]["title"], "Media: Speedrun");
        assert_eq!(posts[0]["platform"], "Various");

        let (_, gallery) = app.json(get("/api/media")).await;
        assert_eq!(gallery[0]["game"], "Celeste");

        let uri = format!("/api/media?id={}", media_id);
        let (status, _) = app.json(app.admin("DELETE", &uri, Value::Null)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, posts) = app.json(get("/api/posts")).await;
        assert!(posts.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rants() {
        let app = setup_test_app().await;
        let (status, body) = app
            .json(app.admin(
                "POST",
                "/api/rants",
                json!({"game": "Dark Souls", "content": "Capra Demon.", "mood": "angry"}),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mood"], "angry");

        let (_, rants) = app.json(get("/api/rants")).await;
        assert_eq!(rants.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stats() {
        let app = setup_test_app().await;
        create_sample(&app).await;

        let (status, body) = app.json(get("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_posts"], 1);
        assert_eq!(body["total_hours"], "120h");
        assert_eq!(body["currently_playing"]["title"], "Elden Ring");
    }

    #[tokio::test]
    async fn test_login_sets_cookie() {
        let app = setup_test_app().await;

        let (status, _) = app
            .json(post_json("/api/auth/login", json!({"password": "wrong"})))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let response = app
            .router
            .clone()
            .oneshot(post_json("/api/auth/login", json!({"password": "hunter2"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("gamelog_session="));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_preview() {
        let app = setup_test_app().await;
        let (status, body) = app
            .json(app.admin("POST", "/api/preview", json!({"content": "**hi**"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["html"], "<strong>hi</strong>");
    }

    #[tokio::test]
    async fn test_steam_proxy_errors() {
        let app = setup_test_app().await;

        let (status, _) = app.json(get("/api/steam")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.json(get("/api/steam?endpoint=nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // No API key configured.
        let (status, _) = app
            .json(get("/api/steam?endpoint=player_summary&steamid=1"))
            .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_pages_render() {
        let app = setup_test_app().await;
        let id = create_sample(&app).await;

        let (status, body) = app.send(get("/")).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Finally beat Malenia"));
        assert!(html.contains("120h"));

        let (status, body) = app.send(get(&format!("/games/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("<strong>Took</strong>"));
        assert!(html.contains("<ul><li>phase one</li><li>phase two</li></ul>"));
        assert!(html.contains("<iframe"));
        assert!(html.contains("abc123"));

        let (status, _) = app.send(get("/games/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.send(get("/gallery")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.send(get("/no/such/page")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stylesheet() {
        let app = setup_test_app().await;
        let response = app.router.clone().oneshot(get("/static/style.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );
    }
}
