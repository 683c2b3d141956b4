//! Data Transfer Objects for API requests and responses.
//!
//! Composite entity DTOs live with their services; this module holds the
//! shapes shared by every service:
//! - `error` - Common error response DTOs
//! - `health` - Health check DTOs

mod error;
mod health;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
