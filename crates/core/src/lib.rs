//! Core types and shared functionality for offcache.
//!
//! This crate provides:
//! - Region-partitioned response cache with SQLite backend
//! - Request and response model shared by the engine and the fetch client
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod network;
pub mod request;
pub mod response;

pub use cache::{BatchEntry, CacheDb, CacheKey, CacheStore, CachedEntry};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use network::Network;
pub use request::{Destination, RequestDescriptor};
pub use response::Response;
