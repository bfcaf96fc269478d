//! Askama template structs for the web interface.
//!
//! Each page struct corresponds to an HTML template in the templates/
//! directory. Row structs carry pre-rendered strings so the templates stay
//! free of formatting logic.

use askama::Template;

use crate::content::{
    format_content, format_untrusted, youtube_embed_url, youtube_thumbnail_url, MediaKind,
};
use crate::models::{Comment, GalleryItem, GamePost, MediaItem, PostWithMedia, QuickRant};
use crate::services::stats::{CurrentlyPlaying, JournalStats, RecentGame};
use crate::services::steam::RecentSteamGame;
use crate::utils::{excerpt_lines, format_playtime};

const DATE_FORMAT: &str = "%b %-d, %Y";
const EXCERPT_CHARS: usize = 280;

/// A post as shown in listings and on its detail page.
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub game: String,
    pub game_logo: String,
    pub platform: String,
    pub mood: String,
    pub mood_emoji: String,
    pub playtime: String,
    pub stars: String,
    pub date_str: String,
    /// Rendered full content.
    pub content_html: String,
    /// Rendered content of a shortened source, for listings.
    pub excerpt_html: String,
    pub media_count: usize,
}

impl PostRow {
    pub fn new(post: &GamePost, media_count: usize) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            game: post.game.clone(),
            game_logo: post.game_logo.clone().unwrap_or_default(),
            platform: post.platform.clone(),
            mood: post.mood.as_str().to_string(),
            mood_emoji: post.mood.emoji().to_string(),
            playtime: post.playtime.clone().unwrap_or_default(),
            stars: post.stars().unwrap_or_default(),
            date_str: post.created_at.format(DATE_FORMAT).to_string(),
            content_html: format_content(&post.content),
            excerpt_html: format_content(excerpt_lines(&post.content, EXCERPT_CHARS)),
            media_count,
        }
    }
}

impl From<&PostWithMedia> for PostRow {
    fn from(p: &PostWithMedia) -> Self {
        Self::new(&p.post, p.media_items.len())
    }
}

/// A media tile. YouTube tiles without a usable id show a placeholder.
pub struct MediaRow {
    pub id: String,
    pub kind: String,
    pub kind_label: String,
    pub url: String,
    pub caption: String,
    pub game: String,
    pub post_id: String,
    pub is_image: bool,
    pub is_video: bool,
    pub is_youtube: bool,
    pub embed_url: String,
    pub thumbnail_url: String,
}

impl MediaRow {
    fn build(
        id: &str,
        kind: MediaKind,
        url: &str,
        caption: &str,
        game: &str,
        post_id: &str,
        youtube_id: Option<&str>,
    ) -> Self {
        let thumbnail_url = match kind {
            MediaKind::Screenshot => url.to_string(),
            MediaKind::YouTube => youtube_id
                .map(youtube_thumbnail_url)
                .unwrap_or_default(),
            MediaKind::Video => String::new(),
        };
        Self {
            id: id.to_string(),
            kind: kind.as_str().to_string(),
            kind_label: kind.label().to_string(),
            url: url.to_string(),
            caption: caption.to_string(),
            game: game.to_string(),
            post_id: post_id.to_string(),
            is_image: kind == MediaKind::Screenshot,
            is_video: kind == MediaKind::Video,
            is_youtube: kind == MediaKind::YouTube,
            embed_url: youtube_id.map(youtube_embed_url).unwrap_or_default(),
            thumbnail_url,
        }
    }

    pub fn from_item(item: &MediaItem, game: &str) -> Self {
        Self::build(
            &item.id,
            item.kind,
            &item.url,
            item.caption.as_deref().unwrap_or_default(),
            game,
            &item.post_id,
            item.youtube_id(),
        )
    }

    /// Whether a YouTube tile lacks a video id.
    pub fn invalid_youtube(&self) -> bool {
        self.is_youtube && self.embed_url.is_empty()
    }
}

impl From<&GalleryItem> for MediaRow {
    fn from(item: &GalleryItem) -> Self {
        Self::build(
            &item.id,
            item.kind,
            &item.url,
            &item.caption,
            &item.game,
            &item.post_id,
            item.youtube_id(),
        )
    }
}

pub struct RantRow {
    pub game: String,
    pub mood_emoji: String,
    pub content_html: String,
    pub date_str: String,
}

impl From<&QuickRant> for RantRow {
    fn from(rant: &QuickRant) -> Self {
        Self {
            game: rant.game.clone(),
            mood_emoji: rant.mood.emoji().to_string(),
            content_html: format_content(&rant.content),
            date_str: rant.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Visitor comment; content is escaped before formatting.
pub struct CommentRow {
    pub username: String,
    pub content_html: String,
    pub date_str: String,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            username: comment.username.clone(),
            content_html: format_untrusted(&comment.content),
            date_str: comment.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

pub struct SteamGameRow {
    pub name: String,
    pub icon_url: String,
    pub recent: String,
    pub total: String,
    pub store_url: String,
}

impl From<&RecentSteamGame> for SteamGameRow {
    fn from(game: &RecentSteamGame) -> Self {
        Self {
            name: game.name.clone(),
            icon_url: game.icon_url.clone().unwrap_or_default(),
            recent: format_playtime(game.playtime_2weeks),
            total: format_playtime(game.playtime_forever),
            store_url: format!("https://store.steampowered.com/app/{}", game.app_id),
        }
    }
}

pub struct RecentGameRow {
    pub title: String,
    pub platform: String,
    pub stars: String,
}

impl From<&RecentGame> for RecentGameRow {
    fn from(game: &RecentGame) -> Self {
        Self {
            title: game.title.clone(),
            platform: game.platform.clone(),
            stars: stars(game.rating),
        }
    }
}

pub struct CurrentlyPlayingRow {
    pub title: String,
    pub platform: String,
    pub playtime: String,
    pub stars: String,
}

impl From<&CurrentlyPlaying> for CurrentlyPlayingRow {
    fn from(game: &CurrentlyPlaying) -> Self {
        Self {
            title: game.title.clone(),
            platform: game.platform.clone(),
            playtime: game.playtime.clone().unwrap_or_default(),
            stars: stars(game.rating),
        }
    }
}

fn stars(rating: Option<i32>) -> String {
    rating
        .map(|r| "★".repeat(r.clamp(0, 5) as usize))
        .unwrap_or_default()
}

/// Home page.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub title: &'a str,
    pub is_admin: bool,
    pub posts: Vec<PostRow>,
    pub rants: Vec<RantRow>,
    pub total_posts: i64,
    pub total_hours: String,
    pub currently_playing: Option<CurrentlyPlayingRow>,
    pub recent_games: Vec<RecentGameRow>,
    pub steam_games: Vec<SteamGameRow>,
    pub screenshots: Vec<MediaRow>,
}

impl<'a> HomeTemplate<'a> {
    pub fn with_stats(mut self, stats: &JournalStats) -> Self {
        self.total_posts = stats.total_posts;
        self.total_hours = stats.total_hours.clone();
        self.currently_playing = stats.currently_playing.as_ref().map(Into::into);
        self.recent_games = stats.recent_games.iter().map(Into::into).collect();
        self
    }
}

/// All game posts.
#[derive(Template)]
#[template(path = "games.html")]
pub struct GamesTemplate<'a> {
    pub title: &'a str,
    pub is_admin: bool,
    pub posts: Vec<PostRow>,
}

/// Single post with media, comments and likes.
#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub title: String,
    pub is_admin: bool,
    pub post: PostRow,
    pub media: Vec<MediaRow>,
    pub comments: Vec<CommentRow>,
    pub like_count: i64,
    pub liked: bool,
}

/// Media gallery.
#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate<'a> {
    pub title: &'a str,
    pub is_admin: bool,
    pub items: Vec<MediaRow>,
}

/// Not found and failure pages.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub is_admin: bool,
    pub message: &'a str,
}
