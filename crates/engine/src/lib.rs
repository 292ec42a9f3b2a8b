//! Request strategy and cache maintenance engine for offcache.
//!
//! The host delivers requests and lifecycle signals to an [`Engine`]; the
//! engine decides per request whether to answer from a cache region, from the
//! network, or with a synthesized fallback, and keeps the regions in shape:
//!
//! - [`classify`] maps a request to a [`RequestClass`]
//! - each class runs one [`Strategy`] against one region
//! - [`Engine::on_install`] seeds the regions, [`Engine::on_activate`] prunes
//!   stale generations, [`Engine::on_sync_tag`] refreshes one resource

pub mod classify;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod lifecycle;
pub mod refresh;
pub mod strategy;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use classify::{RequestClass, classify};
pub use config::{EngineConfig, Regions, RefreshJob};
pub use engine::{Engine, Outcome, Served, Source};
pub use lifecycle::{ActivateReport, InstallReport};
pub use refresh::RefreshOutcome;
pub use strategy::Strategy;
pub use task::DetachedTasks;
