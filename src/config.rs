//! Configuration management for gamelog using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::repository::DbContext;
use crate::services::SteamConfig;

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "gamelog.db";

/// Default admin session lifetime.
pub const DEFAULT_SESSION_TTL_HOURS: u32 = 12;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename inside `data_dir`.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
    /// Argon2 PHC string for the admin password. Login is disabled without it.
    pub admin_password_hash: Option<String>,
    /// Key for signing session tokens.
    pub session_secret: Option<String>,
    pub session_ttl_hours: u32,
    /// Mark the session cookie `Secure` (serve behind HTTPS).
    pub secure_cookies: bool,
    pub steam: SteamConfig,
}

impl Default for Settings {
    fn default() -> Self {
        // Falls back gracefully: data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gamelog");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            admin_password_hash: None,
            session_secret: None,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            secure_cookies: false,
            steam: SteamConfig::default(),
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        match self.database_url {
            Some(ref url) => url.clone(),
            None => format!("sqlite:{}", self.database_path().display()),
        }
    }

    /// Full path to the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }

    /// Session secret, or a per-process random one when none is configured.
    pub fn session_secret_or_random(&self) -> String {
        match self.session_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret.to_string(),
            None => {
                tracing::warn!(
                    "No session_secret configured; admin sessions will not survive a restart"
                );
                format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
            }
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "target")]
    pub data_dir: Option<String>,
    /// Database filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_ttl_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_cookies: Option<bool>,
    /// Steam Web API settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam: Option<SteamConfig>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers gamelog config files in standard locations.
    pub async fn load() -> Self {
        let Ok(discovered) = prefer::load("gamelog").await else {
            return Self::default();
        };
        match discovered.source_path() {
            Some(path) => Self::load_from_path(path).await.unwrap_or_else(|e| {
                tracing::warn!("{}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(contents: &str, ext: &str) -> Result<Self, String> {
        match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e)),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// Paths starting with ~ are expanded.
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref url) = self.database_url {
            settings.database_url = Some(url.clone());
        }
        if let Some(ref hash) = self.admin_password_hash {
            settings.admin_password_hash = Some(hash.clone());
        }
        if let Some(ref secret) = self.session_secret {
            settings.session_secret = Some(secret.clone());
        }
        if let Some(ttl) = self.session_ttl_hours {
            settings.session_ttl_hours = ttl;
        }
        if let Some(secure) = self.secure_cookies {
            settings.secure_cookies = secure;
        }
        if let Some(ref steam) = self.steam {
            settings.steam = steam.clone();
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data directory (--target flag).
    pub target: Option<PathBuf>,
}

/// Look for a gamelog config file inside the data directory.
fn find_config_in_dir(data_dir: &Path) -> Option<PathBuf> {
    ["toml", "json", "yaml", "yml"]
        .iter()
        .map(|ext| data_dir.join(format!("gamelog.{}", ext)))
        .find(|path| path.exists())
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

async fn load_file_config(options: &LoadOptions, target: Option<&Path>) -> Result<Config, String> {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return Config::load_from_path(config_path).await;
    }

    // Priority 2: Config inside the data dir
    if let Some(config_path) = target.and_then(find_config_in_dir) {
        tracing::debug!("Found config in data dir: {}", config_path.display());
        return Config::load_from_path(&config_path).await;
    }

    // Priority 3: Auto-discover via prefer
    Ok(Config::load().await)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Environment variables take precedence over any config file.
fn apply_env_overrides(settings: &mut Settings) {
    if let Some(url) = env_var("DATABASE_URL") {
        tracing::debug!("Using DATABASE_URL from environment: {}", url);
        settings.database_url = Some(url);
    }
    if let Some(hash) = env_var("GAMELOG_ADMIN_PASSWORD_HASH") {
        settings.admin_password_hash = Some(hash);
    }
    if let Some(secret) = env_var("GAMELOG_SESSION_SECRET") {
        settings.session_secret = Some(secret);
    }
    if let Some(key) = env_var("STEAM_API_KEY") {
        settings.steam.api_key = Some(key);
    }
    if let Some(id) = env_var("STEAM_ID") {
        settings.steam.steam_id = Some(id);
    }
    if let Some(name) = env_var("STEAM_VANITY_NAME") {
        settings.steam.vanity_name = Some(name);
    }
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> Result<(Settings, Config), String> {
    let target = options.target.as_deref().map(absolute);
    let config = load_file_config(&options, target.as_deref()).await?;

    let mut settings = Settings::default();
    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    config.apply_to_settings(&mut settings, &base_dir);

    // --target takes precedence over the configured data dir
    if let Some(target) = target {
        settings.data_dir = target;
    }

    apply_env_overrides(&mut settings);
    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let toml = r#"
            data_dir = "~/games"
            admin_password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"
            session_ttl_hours = 24

            [steam]
            api_key = "KEY"
            steam_id = "76561197960287930"
        "#;
        let config = Config::parse(toml, "toml").unwrap();
        assert_eq!(config.session_ttl_hours, Some(24));
        let steam = config.steam.unwrap();
        assert_eq!(steam.api_key.as_deref(), Some("KEY"));
        assert_eq!(steam.api_base, "https://api.steampowered.com");

        let yaml = "target: /srv/gamelog\nsecure_cookies: true\n";
        let config = Config::parse(yaml, "yaml").unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("/srv/gamelog"));
        assert_eq!(config.secure_cookies, Some(true));

        let config = Config::parse(r#"{"database": "journal.db"}"#, "json").unwrap();
        assert_eq!(config.database.as_deref(), Some("journal.db"));

        assert!(Config::parse("not = [valid", "toml").is_err());
    }

    #[test]
    fn test_apply_to_settings() {
        let config = Config {
            data_dir: Some("data".to_string()),
            database: Some("journal.db".to_string()),
            session_ttl_hours: Some(2),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv"));

        assert_eq!(settings.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(settings.database_path(), PathBuf::from("/srv/data/journal.db"));
        assert_eq!(settings.database_url(), "sqlite:/srv/data/journal.db");
        assert_eq!(settings.session_ttl_hours, 2);
        assert!(settings.admin_password_hash.is_none());
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let mut settings = Settings::with_data_dir(PathBuf::from("/srv"));
        settings.database_url = Some("sqlite:/tmp/other.db".to_string());
        assert_eq!(settings.database_url(), "sqlite:/tmp/other.db");
    }

    #[tokio::test]
    async fn test_config_found_in_target_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("gamelog.toml"),
            "database = \"from-target.db\"\nsession_ttl_hours = 3\n",
        )
        .unwrap();

        let (settings, config) = load_settings_with_options(LoadOptions {
            config_path: None,
            target: Some(dir.path().to_path_buf()),
        })
        .await
        .unwrap();

        assert_eq!(settings.data_dir, dir.path());
        assert_eq!(settings.database_filename, "from-target.db");
        assert_eq!(settings.session_ttl_hours, 3);
        assert!(config.source_path.is_some());
    }

    #[test]
    fn test_configured_secret_is_kept() {
        let mut settings = Settings::default();
        settings.session_secret = Some("fixed".to_string());
        assert_eq!(settings.session_secret_or_random(), "fixed");

        settings.session_secret = None;
        let a = settings.session_secret_or_random();
        let b = settings.session_secret_or_random();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
