//! Shared types for the order service
//!
//! Domain entities and the unified error type used by the service and by
//! anything that talks to its HTTP API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
