//! In-memory cache for Steam widget data.
//!
//! The home page shows recently played Steam games; fetching them on every
//! page load would hit the Steam API for each visitor, so results (including
//! empty results after a failed fetch) are kept for a short TTL.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::services::steam::RecentSteamGame;

/// Default TTL for cached Steam data.
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// A cached value with expiration time.
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn get(&self) -> Option<T> {
        if Instant::now() >= self.expires_at {
            None
        } else {
            Some(self.value.clone())
        }
    }
}

pub struct SteamCache {
    recent_games: RwLock<Option<CacheEntry<Vec<RecentSteamGame>>>>,
    ttl: Duration,
}

impl SteamCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            recent_games: RwLock::new(None),
            ttl,
        }
    }

    /// Get cached recently played games, or None if expired/missing.
    pub fn get_recent_games(&self) -> Option<Vec<RecentSteamGame>> {
        self.recent_games
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().and_then(|e| e.get()))
    }

    pub fn set_recent_games(&self, games: Vec<RecentSteamGame>) {
        if let Ok(mut guard) = self.recent_games.write() {
            *guard = Some(CacheEntry::new(games, self.ttl));
        }
    }
}

impl Default for SteamCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> RecentSteamGame {
        RecentSteamGame {
            app_id: 620,
            name: "Portal 2".to_string(),
            playtime_2weeks: 30,
            playtime_forever: 600,
            icon_url: None,
        }
    }

    #[test]
    fn test_cache_hit_and_expiry() {
        let cache = SteamCache::new();
        assert!(cache.get_recent_games().is_none());
        cache.set_recent_games(vec![game()]);
        assert_eq!(cache.get_recent_games().unwrap().len(), 1);

        let expired = SteamCache::with_ttl(Duration::ZERO);
        expired.set_recent_games(vec![game()]);
        assert!(expired.get_recent_games().is_none());
    }
}
