//! The store interface the engine is written against.

use async_trait::async_trait;

use super::connection::CacheDb;
use super::key::CacheKey;
use crate::{Error, Response};

/// A stored response together with the request URL it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    pub url: String,
    pub response: Response,
    /// RFC 3339 insertion time. Informational only, nothing expires.
    pub stored_at: String,
}

/// One row of a batch write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub region: String,
    pub key: CacheKey,
    pub response: Response,
}

/// Region-partitioned response store.
///
/// Every operation is independently atomic per key. Concurrent writes to
/// the same key resolve as last-write-wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Create the region if it doesn't exist.
    async fn open_region(&self, region: &str) -> Result<(), Error>;

    /// Look up a key. A missing region is a miss, not an error.
    async fn get(&self, region: &str, key: &CacheKey) -> Result<Option<CachedEntry>, Error>;

    /// Store a full response, creating the region if needed.
    async fn put(&self, region: &str, key: &CacheKey, response: &Response) -> Result<(), Error>;

    /// Store several entries atomically. On failure nothing is written and
    /// existing entries keep their previous values.
    async fn put_all(&self, entries: &[BatchEntry]) -> Result<(), Error>;

    async fn delete(&self, region: &str, key: &CacheKey) -> Result<bool, Error>;

    /// Request URLs stored in the region.
    async fn keys(&self, region: &str) -> Result<Vec<String>, Error>;

    /// All region names in storage.
    async fn regions(&self) -> Result<Vec<String>, Error>;

    /// Delete a region and every entry in it.
    async fn delete_region(&self, region: &str) -> Result<bool, Error>;
}

#[async_trait]
impl CacheStore for CacheDb {
    async fn open_region(&self, region: &str) -> Result<(), Error> {
        self.create_region(region).await
    }

    async fn get(&self, region: &str, key: &CacheKey) -> Result<Option<CachedEntry>, Error> {
        self.get_entry(region, key).await
    }

    async fn put(&self, region: &str, key: &CacheKey, response: &Response) -> Result<(), Error> {
        self.put_entry(region, key, response).await
    }

    async fn put_all(&self, entries: &[BatchEntry]) -> Result<(), Error> {
        self.put_entries(entries).await
    }

    async fn delete(&self, region: &str, key: &CacheKey) -> Result<bool, Error> {
        self.delete_entry(region, key).await
    }

    async fn keys(&self, region: &str) -> Result<Vec<String>, Error> {
        self.entry_urls(region).await
    }

    async fn regions(&self) -> Result<Vec<String>, Error> {
        self.region_names().await
    }

    async fn delete_region(&self, region: &str) -> Result<bool, Error> {
        self.drop_region(region).await
    }
}
