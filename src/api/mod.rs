//! API Module
//!
//! Demo HTTP surface showing the check/execute/store pattern around an
//! `IdempotencyStore`.
//!
//! # Endpoints
//! - `POST /operations` - Execute an operation once per `Idempotency-Key`
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
