//! Response models for the collection API
//!
//! Request bodies are plain documents; this module only defines the
//! serialized shapes the handlers send back.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    CreateResponse, DeleteResponse, HealthResponse, RefreshResponse, StatsResponse,
    UpdateResponse,
};
