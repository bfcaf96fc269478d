//! Journal statistics for the home page and `/api/stats`.

use serde::Serialize;

use crate::models::GamePost;
use crate::repository::{DbContext, StoreResult};
use crate::utils::parse_playtime_hours;

const RECENT_GAMES: usize = 5;

/// The game with the most recent playtime entry.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentlyPlaying {
    pub title: String,
    pub platform: String,
    pub playtime: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentGame {
    pub title: String,
    pub platform: String,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalStats {
    pub total_posts: i64,
    /// Sum of the hours recorded across all posts, e.g. "57h".
    pub total_hours: String,
    pub currently_playing: Option<CurrentlyPlaying>,
    pub recent_games: Vec<RecentGame>,
}

impl From<GamePost> for CurrentlyPlaying {
    fn from(post: GamePost) -> Self {
        Self {
            title: post.game,
            platform: post.platform,
            playtime: post.playtime,
            rating: post.rating,
        }
    }
}

impl From<GamePost> for RecentGame {
    fn from(post: GamePost) -> Self {
        Self {
            title: post.game,
            platform: post.platform,
            rating: post.rating,
        }
    }
}

/// Total hours across free-form playtime strings.
pub fn total_hours<'a>(playtimes: impl IntoIterator<Item = &'a str>) -> u64 {
    playtimes
        .into_iter()
        .filter_map(parse_playtime_hours)
        .fold(0u64, u64::saturating_add)
}

pub async fn journal_stats(db: &DbContext) -> StoreResult<JournalStats> {
    let posts = db.posts();

    let total_posts = posts.count().await?;
    let playtimes = posts.playtimes().await?;
    let hours = total_hours(playtimes.iter().map(String::as_str));
    let currently_playing = posts.latest_with_playtime().await?.map(CurrentlyPlaying::from);
    let recent_games = posts
        .recent_games(RECENT_GAMES)
        .await?
        .into_iter()
        .map(RecentGame::from)
        .collect();

    Ok(JournalStats {
        total_posts,
        total_hours: format!("{}h", hours),
        currently_playing,
        recent_games,
    })
}
