//! HTML page handlers.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use super::super::auth::Viewer;
use super::super::template_structs::{
    CommentRow, ErrorTemplate, GalleryTemplate, GamesTemplate, HomeTemplate, MediaRow, PostRow,
    PostTemplate, RantRow, SteamGameRow,
};
use super::super::AppState;
use super::helpers::client_user_agent;
use crate::content::MediaKind;
use crate::repository::StoreResult;
use crate::services::journal_stats;
use crate::services::steam::{parse_recent_games, RecentSteamGame};

const HOME_POSTS: i64 = 3;
const HOME_RANTS: i64 = 5;
const HOME_SCREENSHOTS: i64 = 8;

fn render<T: Template>(template: &T) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

fn error_page(status: StatusCode, title: &str, message: &str, viewer: Viewer) -> Response {
    let page = ErrorTemplate {
        title,
        is_admin: viewer.is_admin,
        message,
    };
    (status, render(&page)).into_response()
}

fn failure_page(e: impl std::fmt::Display, viewer: Viewer) -> Response {
    tracing::error!("Failed to load page: {}", e);
    error_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error",
        "Something went wrong loading this page.",
        viewer,
    )
}

/// Fallback for unknown paths.
pub async fn not_found(viewer: Viewer) -> Response {
    error_page(StatusCode::NOT_FOUND, "Not Found", "Page not found.", viewer)
}

pub async fn home(State(state): State<AppState>, viewer: Viewer) -> Response {
    let steam_games = recent_steam_games(&state).await;
    match load_home(&state, viewer).await {
        Ok(page) => {
            let page = HomeTemplate {
                steam_games: steam_games.iter().map(SteamGameRow::from).collect(),
                ..page
            };
            render(&page).into_response()
        }
        Err(e) => failure_page(e, viewer),
    }
}

async fn load_home(state: &AppState, viewer: Viewer) -> StoreResult<HomeTemplate<'static>> {
    let posts = state.db.posts().list_with_media(Some(HOME_POSTS)).await?;
    let rants = state.db.rants().list(Some(HOME_RANTS)).await?;
    let screenshots = state
        .db
        .media()
        .gallery(Some(MediaKind::Screenshot), Some(HOME_SCREENSHOTS))
        .await?;
    let stats = journal_stats(&state.db).await?;

    let page = HomeTemplate {
        title: "Home",
        is_admin: viewer.is_admin,
        posts: posts.iter().map(PostRow::from).collect(),
        rants: rants.iter().map(RantRow::from).collect(),
        total_posts: 0,
        total_hours: String::new(),
        currently_playing: None,
        recent_games: Vec::new(),
        steam_games: Vec::new(),
        screenshots: screenshots.iter().map(MediaRow::from).collect(),
    };
    Ok(page.with_stats(&stats))
}

/// Recently played Steam games for the home widget.
///
/// Failed fetches are cached as empty so an unreachable Steam API is not hit
/// on every page load.
async fn recent_steam_games(state: &AppState) -> Vec<RecentSteamGame> {
    if let Some(games) = state.steam_cache.get_recent_games() {
        return games;
    }
    if !state.steam.config().is_configured() {
        return Vec::new();
    }

    let games = match state.steam.recently_played(None).await {
        Ok(response) => parse_recent_games(&response),
        Err(e) => {
            tracing::warn!("Steam widget fetch failed: {}", e);
            Vec::new()
        }
    };
    state.steam_cache.set_recent_games(games.clone());
    games
}

pub async fn games(State(state): State<AppState>, viewer: Viewer) -> Response {
    match state.db.posts().list_with_media(None).await {
        Ok(posts) => render(&GamesTemplate {
            title: "Games",
            is_admin: viewer.is_admin,
            posts: posts.iter().map(PostRow::from).collect(),
        })
        .into_response(),
        Err(e) => failure_page(e, viewer),
    }
}

pub async fn game_detail(
    State(state): State<AppState>,
    viewer: Viewer,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let post = match state.db.posts().get_with_media(&id).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return error_page(StatusCode::NOT_FOUND, "Not Found", "Post not found.", viewer)
        }
        Err(e) => return failure_page(e, viewer),
    };

    let user_agent = client_user_agent(&headers);
    let comment_repo = state.db.comments();
    let like_repo = state.db.likes();
    let (comments, likes) = match tokio::try_join!(
        comment_repo.list_for_post(&id),
        like_repo.status(&id, &user_agent),
    ) {
        Ok(loaded) => loaded,
        Err(e) => return failure_page(e, viewer),
    };

    let media = post
        .media_items
        .iter()
        .map(|item| MediaRow::from_item(item, &post.post.game))
        .collect();

    render(&PostTemplate {
        title: post.post.title.clone(),
        is_admin: viewer.is_admin,
        post: PostRow::from(&post),
        media,
        comments: comments.iter().map(CommentRow::from).collect(),
        like_count: likes.like_count,
        liked: likes.liked,
    })
    .into_response()
}

pub async fn gallery(State(state): State<AppState>, viewer: Viewer) -> Response {
    match state.db.media().gallery(None, None).await {
        Ok(items) => render(&GalleryTemplate {
            title: "Gallery",
            is_admin: viewer.is_admin,
            items: items.iter().map(MediaRow::from).collect(),
        })
        .into_response(),
        Err(e) => failure_page(e, viewer),
    }
}
