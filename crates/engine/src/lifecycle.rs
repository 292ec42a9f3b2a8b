//! Install-time population and activation-time pruning of cache regions.

use futures::future::join_all;
use offcache_core::{BatchEntry, CacheKey, CacheStore, Network, RequestDescriptor};
use serde::Serialize;
use url::Url;

use crate::classify::classify;
use crate::engine::Engine;

/// What `on_install` did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// `(region, url)` pairs stored, in manifest order. Empty on failure.
    pub stored: Vec<(String, String)>,
    /// Why population was abandoned, if it was.
    pub error: Option<String>,
}

impl InstallReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    fn failed(error: String) -> Self {
        tracing::info!(error = %error, "install population abandoned");
        Self { stored: Vec::new(), error: Some(error) }
    }
}

/// What `on_activate` did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivateReport {
    pub deleted: Vec<String>,
    /// `(region, error)` for deletions that failed. They are retried on
    /// the next activation.
    pub failed: Vec<(String, String)>,
    pub retained: Vec<String>,
}

impl<S, N> Engine<S, N>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    /// Populate: open every recognized region and store the seed manifest.
    ///
    /// Seeds are stored all-or-nothing in one batch write. A failed seed, a
    /// non-2xx answer or a failed write stores nothing and leaves entries
    /// from earlier installs as they were. Never fails: the report carries
    /// the reason instead.
    pub async fn on_install(&self) -> InstallReport {
        for region in self.config.regions.known() {
            if let Err(e) = self.store.open_region(region).await {
                return InstallReport::failed(format!("open region {region}: {e}"));
            }
        }

        let fetched = join_all(self.config.seeds.iter().map(|url| self.fetch_seed(url))).await;
        let seeds = match fetched.into_iter().collect::<Result<Vec<_>, _>>() {
            Ok(seeds) => seeds,
            Err(e) => return InstallReport::failed(e),
        };

        if let Err(e) = self.store.put_all(&seeds).await {
            return InstallReport::failed(format!("store seeds: {e}"));
        }

        tracing::info!(seeds = seeds.len(), "install population complete");
        InstallReport {
            stored: seeds.into_iter().map(|seed| (seed.region, seed.key.url)).collect(),
            error: None,
        }
    }

    /// Fetch one seed and pick the region its class reads from.
    async fn fetch_seed(&self, url: &Url) -> Result<BatchEntry, String> {
        let req = RequestDescriptor::get(url.clone());
        let response = self.network.fetch(&req).await.map_err(|e| format!("fetch {url}: {e}"))?;
        if !response.is_success() {
            return Err(format!("fetch {url}: status {}", response.status));
        }
        let region = self.config.regions.for_class(classify(&req)).to_string();
        Ok(BatchEntry { region, key: CacheKey::for_url(url), response })
    }

    /// Prune: delete every region the current version does not recognize.
    ///
    /// Deletions run concurrently and fail independently. Idempotent.
    pub async fn on_activate(&self) -> ActivateReport {
        let names = match self.store.regions().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "could not list regions, nothing pruned");
                return ActivateReport::default();
            }
        };

        let (retained, stale): (Vec<String>, Vec<String>) =
            names.into_iter().partition(|name| self.config.regions.is_known(name));

        let results = join_all(stale.iter().map(|name| self.store.delete_region(name))).await;

        let mut report = ActivateReport { retained, ..ActivateReport::default() };
        for (name, result) in stale.into_iter().zip(results) {
            match result {
                Ok(_) => {
                    tracing::info!(region = %name, "pruned stale region");
                    report.deleted.push(name);
                }
                Err(e) => {
                    tracing::warn!(region = %name, error = %e, "failed to prune region");
                    report.failed.push((name, e.to_string()));
                }
            }
        }
        report
    }
}
