//! API Module
//!
//! HTTP handlers and routing for the collection REST API.
//!
//! # Endpoints
//! - `GET /api/data` - Read the collection
//! - `POST /api/data` - Append a document
//! - `PUT /api/data/:id` - Update a document
//! - `DELETE /api/data/:id` - Delete a document
//! - `POST /api/update-data` - Refresh the cache from the store
//! - `POST /api/invalidate-cache` - Flush the cache
//! - `GET /api/cache-stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
