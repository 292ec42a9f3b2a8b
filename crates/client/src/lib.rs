//! Network client for offcache.
//!
//! This crate provides the live HTTP leg the engine falls back from:
//! a reqwest-backed implementation of `offcache_core::Network`.

pub mod fetch;

pub use fetch::{FetchClient, FetchConfig, UrlError, canonicalize};
