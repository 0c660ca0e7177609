//! Request and Response models for the demo API
//!
//! DTOs (Data Transfer Objects) used for serializing/deserializing HTTP
//! request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::OperationRequest;
pub use responses::{HealthResponse, OperationResponse, StatsResponse};
