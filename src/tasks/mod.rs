//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: Evicts expired cache entries at the configured check period

mod sweep;

pub use sweep::spawn_sweep_task;
