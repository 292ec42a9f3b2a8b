//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (OFFCACHE_*)
//! 2. TOML config file (if OFFCACHE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Region names identify one cache generation each. Bumping a name on
/// deploy makes the previous generation garbage that the next activation
/// prunes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite cache database.
    ///
    /// Set via OFFCACHE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum response body bytes accepted from the network.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Outbound request timeout in milliseconds.
    ///
    /// Set via OFFCACHE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Base URL that relative seed and refresh URLs resolve against.
    ///
    /// Set via OFFCACHE_ORIGIN environment variable.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Region for pages, data and everything without a dedicated region.
    #[serde(default = "default_version_region")]
    pub version_region: String,

    /// Region for scripts, stylesheets and fonts.
    #[serde(default = "default_assets_region")]
    pub assets_region: String,

    /// Region for images.
    #[serde(default = "default_images_region")]
    pub images_region: String,

    /// URLs fetched and stored on install, in order.
    ///
    /// Set via OFFCACHE_SEED_MANIFEST as a TOML array, e.g. `["/", "/index.html"]`.
    #[serde(default = "default_seed_manifest")]
    pub seed_manifest: Vec<String>,

    /// The one sync tag that triggers a background refresh.
    #[serde(default = "default_refresh_tag")]
    pub refresh_tag: String,

    /// Resource re-fetched when the refresh tag fires.
    #[serde(default = "default_refresh_url")]
    pub refresh_url: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./offcache.sqlite")
}

fn default_user_agent() -> String {
    "offcache/0.1".into()
}

fn default_max_bytes() -> usize {
    10_485_760 // 10MB
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_origin() -> String {
    "http://localhost:8080/".into()
}

fn default_version_region() -> String {
    "techflow-v1.2".into()
}

fn default_assets_region() -> String {
    "techflow-assets-v1".into()
}

fn default_images_region() -> String {
    "techflow-images-v1".into()
}

fn default_seed_manifest() -> Vec<String> {
    [
        "/",
        "/index.html",
        "/miniapp.html",
        "/admin.html",
        "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css",
        "https://unpkg.com/vue@3/dist/vue.global.js",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_refresh_tag() -> String {
    "sync-news".into()
}

fn default_refresh_url() -> String {
    "/data/news.json".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            origin: default_origin(),
            version_region: default_version_region(),
            assets_region: default_assets_region(),
            images_region: default_images_region(),
            seed_manifest: default_seed_manifest(),
            refresh_tag: default_refresh_tag(),
            refresh_url: default_refresh_url(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `OFFCACHE_`
    /// 2. TOML file from `OFFCACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or parsed, or if
    /// validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("OFFCACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("OFFCACHE_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// The origin as a parsed URL.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.origin).map_err(|e| ConfigError::Invalid { field: "origin".into(), reason: e.to_string() })
    }

    /// Resolve a possibly relative URL against the origin.
    pub fn resolve(&self, url: &str) -> Result<Url, ConfigError> {
        self.origin_url()?
            .join(url)
            .map_err(|e| ConfigError::Invalid { field: "url".into(), reason: format!("{url}: {e}") })
    }

    /// Every region name the current version recognizes.
    pub fn known_regions(&self) -> [&str; 3] {
        [self.version_region.as_str(), self.assets_region.as_str(), self.images_region.as_str()]
    }
}
