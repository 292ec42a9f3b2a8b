//! The engine object the host drives.

use std::sync::Arc;

use offcache_core::{CacheStore, Network, RequestDescriptor, Response};

use crate::classify::classify;
use crate::config::EngineConfig;
use crate::strategy::Strategy;
use crate::task::DetachedTasks;

/// Where a served response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Network,
    Cache,
    /// Synthesized by the engine.
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Cache => "cache",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served {
    pub response: Response,
    pub source: Source,
}

impl Served {
    pub fn network(response: Response) -> Self {
        Self { response, source: Source::Network }
    }

    pub fn cache(response: Response) -> Self {
        Self { response, source: Source::Cache }
    }

    pub fn fallback(response: Response) -> Self {
        Self { response, source: Source::Fallback }
    }
}

/// Result of [`Engine::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Served(Served),
    /// Not for the engine; the host forwards the request untouched.
    PassThrough,
}

impl Outcome {
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Served(served) => Some(&served.response),
            Self::PassThrough => None,
        }
    }

    pub fn source(&self) -> Option<Source> {
        match self {
            Self::Served(served) => Some(served.source),
            Self::PassThrough => None,
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}

/// Strategy selection and cache maintenance over an injected store and
/// network.
///
/// Entry points: [`handle`](Self::handle) per request,
/// [`on_install`](Self::on_install) once at startup,
/// [`on_activate`](Self::on_activate) when a version takes over, and
/// [`on_sync_tag`](Self::on_sync_tag) for background refresh.
pub struct Engine<S, N> {
    pub(crate) store: Arc<S>,
    pub(crate) network: Arc<N>,
    pub(crate) config: EngineConfig,
    pub(crate) tasks: DetachedTasks,
}

impl<S, N> Engine<S, N>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    pub fn new(store: Arc<S>, network: Arc<N>, config: EngineConfig) -> Self {
        Self { store, network, config, tasks: DetachedTasks::new() }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Serve one request. Never fails: every GET resolves to a response,
    /// everything else is handed back as [`Outcome::PassThrough`].
    pub async fn handle(&self, req: &RequestDescriptor) -> Outcome {
        if !req.is_get() {
            tracing::debug!(method = %req.method, url = %req.url, "pass-through");
            return Outcome::PassThrough;
        }

        let class = classify(req);
        let strategy = Strategy::for_class(class);
        let region = self.config.regions.for_class(class);

        let served = self.execute(strategy, req, region).await;

        tracing::debug!(
            url = %req.url,
            class = class.as_str(),
            strategy = strategy.as_str(),
            region,
            source = served.source.as_str(),
            status = served.response.status,
            "handled"
        );

        Outcome::Served(served)
    }

    /// Wait for outstanding background writes.
    pub async fn settle(&self) {
        self.tasks.settle().await;
    }
}

impl<S, N> Clone for Engine<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            network: Arc::clone(&self.network),
            config: self.config.clone(),
            tasks: self.tasks.clone(),
        }
    }
}
