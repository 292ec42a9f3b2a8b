//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 100MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `origin` is not an http(s) URL
    /// - a region name is empty or two region names collide
    /// - `refresh_tag` is empty
    /// - a seed URL or the refresh URL cannot be resolved against the origin
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 100 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 100MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        let origin = self.origin_url()?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(invalid("origin", format!("unsupported scheme: {}", origin.scheme())));
        }

        let regions = [
            ("version_region", &self.version_region),
            ("assets_region", &self.assets_region),
            ("images_region", &self.images_region),
        ];
        for (field, name) in regions {
            if name.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }
        for (i, (field, name)) in regions.iter().enumerate() {
            if regions[..i].iter().any(|(_, other)| other == name) {
                return Err(invalid(field, format!("region name {name:?} is already used")));
            }
        }

        if self.refresh_tag.is_empty() {
            return Err(invalid("refresh_tag", "must not be empty"));
        }

        for seed in &self.seed_manifest {
            self.resolve(seed)
                .map_err(|_| invalid("seed_manifest", format!("cannot resolve {seed:?}")))?;
        }
        self.resolve(&self.refresh_url)
            .map_err(|_| invalid("refresh_url", format!("cannot resolve {:?}", self.refresh_url)))?;

        if self.seed_manifest.is_empty() {
            tracing::warn!("seed_manifest is empty; nothing will be available offline until first visit");
        }

        Ok(())
    }
}
