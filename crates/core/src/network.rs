//! The network seam used by the engine.

use async_trait::async_trait;

use crate::{Error, RequestDescriptor, Response};

/// Something that can perform a live fetch.
///
/// `Err` means no response was obtained at all (connection failure, timeout,
/// oversized body). Every HTTP status, 4xx and 5xx included, is `Ok`.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Response, Error>;
}
