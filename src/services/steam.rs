//! Steam Web API client.
//!
//! Responses are passed through as raw JSON; the widget and the `/api/steam`
//! proxy only pick a handful of fields out of them.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

const RECENTLY_PLAYED_COUNT: &str = "10";

/// Steam integration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteamConfig {
    /// Web API key; without it every API call fails with `MissingApiKey`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Default 64-bit Steam id for profile lookups.
    #[serde(default)]
    pub steam_id: Option<String>,
    /// Default vanity name (the `/id/<name>` part of the profile URL).
    #[serde(default)]
    pub vanity_name: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_store_base")]
    pub store_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.steampowered.com".to_string()
}
fn default_store_base() -> String {
    "https://store.steampowered.com".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            steam_id: None,
            vanity_name: None,
            api_base: default_api_base(),
            store_base: default_store_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SteamConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("Steam API key is not configured")]
    MissingApiKey,

    #[error("{0} is required")]
    MissingParameter(&'static str),

    #[error("invalid endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("invalid Steam URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Steam request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Steam API request failed: {0}")]
    Status(StatusCode),
}

/// Proxyable Steam operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteamEndpoint {
    ResolveVanityUrl,
    PlayerSummary,
    OwnedGames,
    RecentlyPlayed,
    GameDetails,
}

impl SteamEndpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResolveVanityUrl => "resolve_vanity_url",
            Self::PlayerSummary => "player_summary",
            Self::OwnedGames => "owned_games",
            Self::RecentlyPlayed => "recently_played",
            Self::GameDetails => "game_details",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "resolve_vanity_url" => Some(Self::ResolveVanityUrl),
            "player_summary" => Some(Self::PlayerSummary),
            "owned_games" => Some(Self::OwnedGames),
            "recently_played" => Some(Self::RecentlyPlayed),
            "game_details" => Some(Self::GameDetails),
            _ => None,
        }
    }
}

/// Optional overrides accepted by [`SteamClient::call`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SteamParams {
    #[serde(default)]
    pub steamid: Option<String>,
    #[serde(default)]
    pub vanityurl: Option<String>,
    #[serde(default)]
    pub appid: Option<String>,
}

#[derive(Clone)]
pub struct SteamClient {
    client: Client,
    config: SteamConfig,
}

impl SteamClient {
    pub fn new(config: SteamConfig) -> Result<Self, SteamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SteamConfig {
        &self.config
    }

    /// Dispatch a proxied call by endpoint name.
    pub async fn call(&self, endpoint: &str, params: &SteamParams) -> Result<Value, SteamError> {
        let endpoint = SteamEndpoint::from_str(endpoint)
            .ok_or_else(|| SteamError::UnknownEndpoint(endpoint.to_string()))?;
        let steam_id = params.steamid.as_deref();

        match endpoint {
            SteamEndpoint::ResolveVanityUrl => {
                self.resolve_vanity_url(params.vanityurl.as_deref()).await
            }
            SteamEndpoint::PlayerSummary => self.player_summary(steam_id).await,
            SteamEndpoint::OwnedGames => self.owned_games(steam_id).await,
            SteamEndpoint::RecentlyPlayed => self.recently_played(steam_id).await,
            SteamEndpoint::GameDetails => {
                let app_id = params
                    .appid
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .ok_or(SteamError::MissingParameter("appid"))?;
                self.game_details(app_id).await
            }
        }
    }

    pub async fn resolve_vanity_url(&self, vanity: Option<&str>) -> Result<Value, SteamError> {
        let vanity = vanity
            .or(self.config.vanity_name.as_deref())
            .ok_or(SteamError::MissingParameter("vanityurl"))?;
        self.api_get("ISteamUser/ResolveVanityURL/v0001/", &[("vanityurl", vanity)])
            .await
    }

    pub async fn player_summary(&self, steam_id: Option<&str>) -> Result<Value, SteamError> {
        let steam_id = self.steam_id(steam_id)?;
        self.api_get("ISteamUser/GetPlayerSummaries/v0002/", &[("steamids", steam_id)])
            .await
    }

    pub async fn owned_games(&self, steam_id: Option<&str>) -> Result<Value, SteamError> {
        let steam_id = self.steam_id(steam_id)?;
        self.api_get(
            "IPlayerService/GetOwnedGames/v0001/",
            &[
                ("steamid", steam_id),
                ("include_appinfo", "true"),
                ("include_played_free_games", "true"),
            ],
        )
        .await
    }

    pub async fn recently_played(&self, steam_id: Option<&str>) -> Result<Value, SteamError> {
        let steam_id = self.steam_id(steam_id)?;
        self.api_get(
            "IPlayerService/GetRecentlyPlayedGames/v0001/",
            &[("steamid", steam_id), ("count", RECENTLY_PLAYED_COUNT)],
        )
        .await
    }

    /// Store page details; does not need an API key.
    pub async fn game_details(&self, app_id: &str) -> Result<Value, SteamError> {
        let mut url = Url::parse(&self.config.store_base)?.join("api/appdetails")?;
        url.query_pairs_mut()
            .append_pair("appids", app_id)
            .append_pair("l", "english");
        self.fetch_json(url).await
    }

    fn steam_id<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, SteamError> {
        requested
            .filter(|s| !s.is_empty())
            .or(self.config.steam_id.as_deref())
            .ok_or(SteamError::MissingParameter("steamid"))
    }

    async fn api_get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, SteamError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(SteamError::MissingApiKey)?;

        let base = format!("{}/", self.config.api_base.trim_end_matches('/'));
        let mut url = Url::parse(&base)?.join(path)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", key);
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }
        self.fetch_json(url).await
    }

    async fn fetch_json(&self, url: Url) -> Result<Value, SteamError> {
        debug!("Steam request: {}{}", url.origin().ascii_serialization(), url.path());
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SteamError::Status(status));
        }

        Ok(response.json().await?)
    }
}

/// Extract the profile identifier from a Steam community URL.
///
/// Handles both `/id/<vanity>` and `/profiles/<steamid64>` forms.
pub fn steam_id_from_profile_url(profile_url: &str) -> Option<&str> {
    static PROFILE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"steamcommunity\.com/(?:id|profiles)/([^/?#]+)").unwrap()
    });
    PROFILE
        .captures(profile_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Icon image for a game from its `img_icon_url` hash.
pub fn game_icon_url(app_id: u64, icon_hash: &str) -> String {
    format!(
        "https://media.steampowered.com/steamcommunity/public/images/apps/{}/{}.jpg",
        app_id, icon_hash
    )
}

/// A recently played game, extracted from a `recently_played` response.
#[derive(Debug, Clone, Serialize)]
pub struct RecentSteamGame {
    pub app_id: u64,
    pub name: String,
    pub playtime_2weeks: u64,
    pub playtime_forever: u64,
    pub icon_url: Option<String>,
}

/// Pick the game list out of a `GetRecentlyPlayedGames` response.
pub fn parse_recent_games(response: &Value) -> Vec<RecentSteamGame> {
    let Some(games) = response
        .get("response")
        .and_then(|r| r.get("games"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    games
        .iter()
        .filter_map(|game| {
            let app_id = game.get("appid")?.as_u64()?;
            let name = game.get("name")?.as_str()?.to_string();
            let minutes = |field: &str| game.get(field).and_then(Value::as_u64).unwrap_or(0);
            let icon_url = game
                .get("img_icon_url")
                .and_then(Value::as_str)
                .filter(|h| !h.is_empty())
                .map(|hash| game_icon_url(app_id, hash));
            Some(RecentSteamGame {
                app_id,
                name,
                playtime_2weeks: minutes("playtime_2weeks"),
                playtime_forever: minutes("playtime_forever"),
                icon_url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_url() {
        assert_eq!(
            steam_id_from_profile_url("https://steamcommunity.com/id/gabelogannewell/"),
            Some("gabelogannewell")
        );
        assert_eq!(
            steam_id_from_profile_url("https://steamcommunity.com/profiles/76561197960287930"),
            Some("76561197960287930")
        );
        assert_eq!(steam_id_from_profile_url("https://example.com/id/x"), None);
    }

    #[test]
    fn test_endpoint_names() {
        for endpoint in [
            SteamEndpoint::ResolveVanityUrl,
            SteamEndpoint::PlayerSummary,
            SteamEndpoint::OwnedGames,
            SteamEndpoint::RecentlyPlayed,
            SteamEndpoint::GameDetails,
        ] {
            assert_eq!(SteamEndpoint::from_str(endpoint.as_str()), Some(endpoint));
        }
        assert_eq!(SteamEndpoint::from_str("achievements"), None);
    }

    #[tokio::test]
    async fn test_call_validates_before_network() {
        let client = SteamClient::new(SteamConfig::default()).unwrap();

        assert!(matches!(
            client.call("bogus", &SteamParams::default()).await,
            Err(SteamError::UnknownEndpoint(_))
        ));
        assert!(matches!(
            client.call("game_details", &SteamParams::default()).await,
            Err(SteamError::MissingParameter("appid"))
        ));
        assert!(matches!(
            client.call("player_summary", &SteamParams::default()).await,
            Err(SteamError::MissingParameter("steamid"))
        ));

        let params = SteamParams {
            steamid: Some("76561197960287930".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            client.call("owned_games", &params).await,
            Err(SteamError::MissingApiKey)
        ));
    }

    #[test]
    fn test_parse_recent_games() {
        let response = json!({
            "response": {
                "total_count": 2,
                "games": [
                    {"appid": 620, "name": "Portal 2", "playtime_2weeks": 90,
                     "playtime_forever": 1200, "img_icon_url": "abc"},
                    {"appid": 10, "name": "Counter-Strike", "playtime_forever": 5,
                     "img_icon_url": ""},
                    {"name": "missing appid"}
                ]
            }
        });
        let games = parse_recent_games(&response);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "Portal 2");
        assert_eq!(
            games[0].icon_url.as_deref(),
            Some("https://media.steampowered.com/steamcommunity/public/images/apps/620/abc.jpg")
        );
        assert_eq!(games[1].playtime_2weeks, 0);
        assert!(games[1].icon_url.is_none());

        assert!(parse_recent_games(&json!({})).is_empty());
    }
}
