//! Tag-triggered background refresh.

use offcache_core::{CacheKey, CacheStore, Error, Network, RequestDescriptor, Response};
use serde::Serialize;

use crate::engine::Engine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The tag is not the configured refresh tag.
    Ignored,
    Refreshed,
    /// Fetch, parse or store failed. The stored entry is untouched.
    Failed(String),
}

impl<S, N> Engine<S, N>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    /// Run the refresh job if `tag` is the configured refresh tag.
    ///
    /// The resource is fetched, parsed as JSON and stored re-serialized in
    /// the version region. Failures are logged and reported, never raised.
    pub async fn on_sync_tag(&self, tag: &str) -> RefreshOutcome {
        if tag != self.config.refresh.tag {
            tracing::debug!(tag, "ignoring unknown sync tag");
            return RefreshOutcome::Ignored;
        }

        match self.refresh().await {
            Ok(()) => {
                tracing::info!(tag, url = %self.config.refresh.url, "background refresh complete");
                RefreshOutcome::Refreshed
            }
            Err(e) => {
                tracing::warn!(tag, url = %self.config.refresh.url, error = %e, "background refresh failed");
                RefreshOutcome::Failed(e.to_string())
            }
        }
    }

    async fn refresh(&self) -> Result<(), Error> {
        let url = &self.config.refresh.url;
        let response = self.network.fetch(&RequestDescriptor::get(url.clone())).await?;
        if !response.is_success() {
            return Err(Error::HttpError(format!("{url}: status {}", response.status)));
        }

        let data: serde_json::Value = serde_json::from_slice(&response.body)?;
        let body = serde_json::to_vec(&data)?;
        let fresh = Response::new(200, "OK", body).with_header("Content-Type", "application/json");

        self.store.put(&self.config.regions.version, &CacheKey::for_url(url), &fresh).await
    }
}
