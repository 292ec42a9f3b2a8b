//! Test doubles for the store and network seams.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use offcache_core::{
    AppConfig, BatchEntry, CacheDb, CacheKey, CacheStore, CachedEntry, Destination, Error, Network, RequestDescriptor,
    Response,
};

use crate::config::EngineConfig;
use crate::engine::Engine;

pub fn ok(body: &str) -> Response {
    Response::new(200, "OK", body.to_string())
}

pub fn get(url: &str) -> RequestDescriptor {
    RequestDescriptor::get(url.parse().unwrap())
}

pub fn image(url: &str) -> RequestDescriptor {
    get(url).with_destination(Destination::Image)
}

/// Canned responses keyed by full URL. Unrouted URLs fail like a refused
/// connection.
#[derive(Default)]
pub struct StubNetwork {
    routes: Mutex<HashMap<String, Response>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl StubNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        let network = Self::new();
        network.set_offline(true);
        network
    }

    pub fn route(self, url: &str, response: Response) -> Self {
        self.set_route(url, response);
        self
    }

    pub fn set_route(&self, url: &str, response: Response) {
        let url = url.parse::<url::Url>().unwrap().to_string();
        self.routes.lock().unwrap().insert(url, response);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for StubNetwork {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Response, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Network("offline".into()));
        }
        self.routes
            .lock()
            .unwrap()
            .get(request.url.as_str())
            .cloned()
            .ok_or_else(|| Error::Network(format!("connection refused: {}", request.url)))
    }
}

/// In-memory [`CacheDb`] with switchable failures and an operation counter.
pub struct FaultyStore {
    inner: CacheDb,
    fail_reads: bool,
    fail_writes: bool,
    fail_listing: bool,
    fail_writes_to: HashSet<String>,
    fail_deletes_of: HashSet<String>,
    write_delay: Option<Duration>,
    operations: AtomicUsize,
}

impl FaultyStore {
    pub async fn new() -> Self {
        Self {
            inner: CacheDb::open_in_memory().await.unwrap(),
            fail_reads: false,
            fail_writes: false,
            fail_listing: false,
            fail_writes_to: HashSet::new(),
            fail_deletes_of: HashSet::new(),
            write_delay: None,
            operations: AtomicUsize::new(0),
        }
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_writes_to(mut self, region: &str) -> Self {
        self.fail_writes_to.insert(region.to_string());
        self
    }

    pub fn failing_delete_of(mut self, region: &str) -> Self {
        self.fail_deletes_of.insert(region.to_string());
        self
    }

    /// Delay every single-entry put by `delay` before it reaches the db.
    pub fn slow_writes(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Number of store calls made so far, failed ones included.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }

    fn write_fails(&self, region: &str) -> bool {
        self.fail_writes || self.fail_writes_to.contains(region)
    }
}

fn injected(what: &str) -> Error {
    Error::CorruptEntry(format!("injected {what} failure"))
}

#[async_trait]
impl CacheStore for FaultyStore {
    async fn open_region(&self, region: &str) -> Result<(), Error> {
        self.touch();
        if self.fail_writes {
            return Err(injected("open"));
        }
        self.inner.open_region(region).await
    }

    async fn get(&self, region: &str, key: &CacheKey) -> Result<Option<CachedEntry>, Error> {
        self.touch();
        if self.fail_reads {
            return Err(injected("read"));
        }
        self.inner.get(region, key).await
    }

    async fn put(&self, region: &str, key: &CacheKey, response: &Response) -> Result<(), Error> {
        self.touch();
        if self.write_fails(region) {
            return Err(injected("write"));
        }
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.put(region, key, response).await
    }

    async fn put_all(&self, entries: &[BatchEntry]) -> Result<(), Error> {
        self.touch();
        if entries.iter().any(|entry| self.write_fails(&entry.region)) {
            return Err(injected("write"));
        }
        self.inner.put_all(entries).await
    }

    async fn delete(&self, region: &str, key: &CacheKey) -> Result<bool, Error> {
        self.touch();
        self.inner.delete(region, key).await
    }

    async fn keys(&self, region: &str) -> Result<Vec<String>, Error> {
        self.touch();
        if self.fail_reads {
            return Err(injected("read"));
        }
        self.inner.keys(region).await
    }

    async fn regions(&self) -> Result<Vec<String>, Error> {
        self.touch();
        if self.fail_listing {
            return Err(injected("listing"));
        }
        self.inner.regions().await
    }

    async fn delete_region(&self, region: &str) -> Result<bool, Error> {
        self.touch();
        if self.fail_deletes_of.contains(region) {
            return Err(injected("delete"));
        }
        self.inner.delete_region(region).await
    }
}

/// App config rooted at `https://app.test/` with the default region names.
pub fn test_config() -> EngineConfig {
    let app = AppConfig {
        origin: "https://app.test/".to_string(),
        seed_manifest: vec!["/".into(), "/index.html".into(), "/app.js".into(), "/img/logo.png".into()],
        ..AppConfig::default()
    };
    EngineConfig::from_app_config(&app).unwrap()
}

pub async fn engine(network: StubNetwork) -> (Engine<FaultyStore, StubNetwork>, Arc<StubNetwork>) {
    engine_with(FaultyStore::new().await, network).await
}

pub async fn engine_with(
    store: FaultyStore, network: StubNetwork,
) -> (Engine<FaultyStore, StubNetwork>, Arc<StubNetwork>) {
    let network = Arc::new(network);
    let engine = Engine::new(Arc::new(store), Arc::clone(&network), test_config());
    (engine, network)
}
