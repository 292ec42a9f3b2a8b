//! Caching strategies and their execution.

use std::sync::Arc;

use offcache_core::{CacheKey, CacheStore, Network, RequestDescriptor, Response};

use crate::classify::RequestClass;
use crate::engine::{Engine, Served};
use crate::fallback;

/// How a request class is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Cache, then network with write-through, then a 503.
    CacheFirst,
    /// Network (200s persisted in the background), then cache, then a 503.
    NetworkFirst,
    /// Like `CacheFirst`, but the last resort is a placeholder image.
    CacheFirstImageFallback,
    /// Like `NetworkFirst`, with the short offline message.
    NetworkFirstDefault,
}

impl Strategy {
    pub fn for_class(class: RequestClass) -> Self {
        match class {
            RequestClass::StaticAsset => Self::CacheFirst,
            RequestClass::PageOrData => Self::NetworkFirst,
            RequestClass::Image => Self::CacheFirstImageFallback,
            RequestClass::Other => Self::NetworkFirstDefault,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CacheFirst => "cache-first",
            Self::NetworkFirst => "network-first",
            Self::CacheFirstImageFallback => "cache-first-image-fallback",
            Self::NetworkFirstDefault => "network-first-default",
        }
    }

    /// Response used when every other source has failed.
    pub fn fallback(&self) -> Response {
        match self {
            Self::CacheFirst => fallback::asset_unavailable(),
            Self::NetworkFirst => fallback::offline_use_cache(),
            Self::CacheFirstImageFallback => fallback::image_placeholder(),
            Self::NetworkFirstDefault => fallback::offline(),
        }
    }

    fn is_cache_first(&self) -> bool {
        matches!(self, Self::CacheFirst | Self::CacheFirstImageFallback)
    }
}

impl<S, N> Engine<S, N>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    pub(crate) async fn execute(&self, strategy: Strategy, req: &RequestDescriptor, region: &str) -> Served {
        let key = CacheKey::for_url(&req.url);
        if strategy.is_cache_first() {
            self.cache_first(strategy, req, region, &key).await
        } else {
            self.network_first(strategy, req, region, &key).await
        }
    }

    async fn cache_first(&self, strategy: Strategy, req: &RequestDescriptor, region: &str, key: &CacheKey) -> Served {
        if let Some(response) = self.lookup(region, key).await {
            return Served::cache(response);
        }

        match self.network.fetch(req).await {
            Ok(response) => {
                self.write_through(region, key, &response).await;
                Served::network(response)
            }
            Err(e) => {
                tracing::info!(url = %key.url, strategy = strategy.as_str(), error = %e, "network failed on cache miss");
                Served::fallback(strategy.fallback())
            }
        }
    }

    async fn network_first(
        &self, strategy: Strategy, req: &RequestDescriptor, region: &str, key: &CacheKey,
    ) -> Served {
        match self.network.fetch(req).await {
            Ok(response) => {
                if response.is_ok() {
                    self.persist_detached(region, key, &response);
                } else {
                    tracing::debug!(url = %key.url, status = response.status, "not persisting non-200 response");
                }
                Served::network(response)
            }
            Err(e) => {
                tracing::info!(url = %key.url, strategy = strategy.as_str(), error = %e, "network failed, trying cache");
                match self.lookup(region, key).await {
                    Some(response) => Served::cache(response),
                    None => Served::fallback(strategy.fallback()),
                }
            }
        }
    }

    /// Cache read where a backend failure counts as a miss.
    async fn lookup(&self, region: &str, key: &CacheKey) -> Option<Response> {
        match self.store.get(region, key).await {
            Ok(entry) => entry.map(|e| e.response),
            Err(e) => {
                tracing::warn!(region, url = %key.url, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Persist before responding. The write runs as a tracked task so it
    /// finishes even if the caller stops waiting for the response.
    async fn write_through(&self, region: &str, key: &CacheKey, response: &Response) {
        let handle = self.spawn_put("write-through", region, key, response);
        if let Err(e) = handle.await {
            tracing::warn!(region, url = %key.url, error = %e, "write-through task aborted");
        }
    }

    fn persist_detached(&self, region: &str, key: &CacheKey, response: &Response) {
        drop(self.spawn_put("persist", region, key, response));
    }

    fn spawn_put(
        &self, label: &'static str, region: &str, key: &CacheKey, response: &Response,
    ) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let region = region.to_string();
        let key = key.clone();
        let response = response.clone();
        self.tasks.spawn(label, async move { store.put(&region, &key, &response).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_class() {
        assert_eq!(Strategy::for_class(RequestClass::StaticAsset), Strategy::CacheFirst);
        assert_eq!(Strategy::for_class(RequestClass::PageOrData), Strategy::NetworkFirst);
        assert_eq!(Strategy::for_class(RequestClass::Image), Strategy::CacheFirstImageFallback);
        assert_eq!(Strategy::for_class(RequestClass::Other), Strategy::NetworkFirstDefault);
    }

    #[test]
    fn test_fallback_per_strategy() {
        assert_eq!(Strategy::CacheFirst.fallback().text(), fallback::ASSET_ERROR_BODY);
        assert_eq!(Strategy::NetworkFirst.fallback().text(), fallback::OFFLINE_USE_CACHE_BODY);
        assert_eq!(Strategy::NetworkFirstDefault.fallback().text(), fallback::OFFLINE_BODY);
        assert_eq!(Strategy::CacheFirstImageFallback.fallback().status, 200);
    }
}
