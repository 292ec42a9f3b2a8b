//! Engine configuration resolved from `AppConfig`.

use offcache_core::{AppConfig, ConfigError};
use url::Url;

use crate::classify::RequestClass;

/// The three region names recognized by the running version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regions {
    /// Pages, data and default-strategy responses. Versioned per deploy.
    pub version: String,
    /// Scripts, stylesheets and fonts.
    pub assets: String,
    pub images: String,
}

impl Regions {
    pub fn known(&self) -> [&str; 3] {
        [self.version.as_str(), self.assets.as_str(), self.images.as_str()]
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known().contains(&name)
    }

    /// Region a request class reads from and writes to.
    pub fn for_class(&self, class: RequestClass) -> &str {
        match class {
            RequestClass::StaticAsset => &self.assets,
            RequestClass::Image => &self.images,
            RequestClass::PageOrData | RequestClass::Other => &self.version,
        }
    }
}

/// The one tag-triggered refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshJob {
    pub tag: String,
    pub url: Url,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub regions: Regions,
    /// Resources stored on install, in manifest order.
    pub seeds: Vec<Url>,
    pub refresh: RefreshJob,
}

impl EngineConfig {
    /// Resolve region names and relative URLs from the application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let seeds = config
            .seed_manifest
            .iter()
            .map(|seed| config.resolve(seed))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            regions: Regions {
                version: config.version_region.clone(),
                assets: config.assets_region.clone(),
                images: config.images_region.clone(),
            },
            seeds,
            refresh: RefreshJob { tag: config.refresh_tag.clone(), url: config.resolve(&config.refresh_url)? },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_app_config() {
        let config = EngineConfig::from_app_config(&AppConfig::default()).unwrap();
        assert_eq!(config.regions.version, "techflow-v1.2");
        assert_eq!(config.seeds.len(), 6);
        assert_eq!(config.seeds[0].as_str(), "http://localhost:8080/");
        assert_eq!(config.seeds[1].as_str(), "http://localhost:8080/index.html");
        assert_eq!(config.seeds[5].host_str(), Some("unpkg.com"));
        assert_eq!(config.refresh.tag, "sync-news");
        assert_eq!(config.refresh.url.as_str(), "http://localhost:8080/data/news.json");
    }

    #[test]
    fn test_region_for_class() {
        let config = EngineConfig::from_app_config(&AppConfig::default()).unwrap();
        let regions = &config.regions;
        assert_eq!(regions.for_class(RequestClass::StaticAsset), "techflow-assets-v1");
        assert_eq!(regions.for_class(RequestClass::Image), "techflow-images-v1");
        assert_eq!(regions.for_class(RequestClass::PageOrData), "techflow-v1.2");
        assert_eq!(regions.for_class(RequestClass::Other), "techflow-v1.2");
    }

    #[test]
    fn test_is_known() {
        let config = EngineConfig::from_app_config(&AppConfig::default()).unwrap();
        assert!(config.regions.is_known("techflow-images-v1"));
        assert!(!config.regions.is_known("techflow-v1.1"));
    }
}
