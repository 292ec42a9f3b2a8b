//! SQLite-backed response cache partitioned into named regions.
//!
//! This module provides a persistent region/key store using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - Regions created implicitly on first write and deleted as a unit
//! - Request identities hashed with SHA-256
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//!
//! Entries have no expiry; they live exactly as long as their region.

pub mod connection;
pub mod key;
pub mod migrations;
pub mod regions;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use key::CacheKey;
pub use store::{BatchEntry, CacheStore, CachedEntry};
