//! Response DTOs for the demo API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::CacheStats;

/// Response body for POST /operations
///
/// Serialized once when the operation executes; retries replay those bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    /// The caller's idempotency key
    pub operation_id: Uuid,
    /// Identifier assigned by this execution of the operation
    pub result_id: Uuid,
    pub description: String,
    pub amount: i64,
    /// When the operation executed
    pub processed_at: DateTime<Utc>,
}

impl OperationResponse {
    /// Creates a response for a fresh execution
    pub fn executed(operation_id: Uuid, description: impl Into<String>, amount: i64) -> Self {
        Self {
            operation_id,
            result_id: Uuid::new_v4(),
            description: description.into(),
            amount,
            processed_at: Utc::now(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Checks that found a stored result
    pub hits: u64,
    /// Checks that found nothing
    pub misses: u64,
    pub stores: u64,
    pub overwrites: u64,
    /// Entries removed by the sweeper
    pub swept: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            overwrites: stats.overwrites,
            swept: stats.swept,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
