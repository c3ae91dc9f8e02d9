//! Cached Collection - a JSON collection server with a TTL response cache
//!
//! CRUD endpoints over one JSON file, with cache-aside reads and
//! write-through mutations.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::{Config, ConsistencyPolicy};
pub use tasks::spawn_sweep_task;
