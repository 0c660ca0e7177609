//! Request DTOs for the demo API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum accepted length of an operation description
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

/// Request body for POST /operations
///
/// # Fields
/// - `description`: What the operation does, echoed in the result
/// - `amount`: Amount in minor units, must be positive
#[derive(Debug, Clone, Deserialize)]
pub struct OperationRequest {
    pub description: String,
    pub amount: i64,
}

impl OperationRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.description.is_empty() {
            return Some("Description cannot be empty".to_string());
        }
        if self.description.len() > MAX_DESCRIPTION_LENGTH {
            return Some(format!(
                "Description exceeds maximum length of {} characters",
                MAX_DESCRIPTION_LENGTH
            ));
        }
        if self.amount <= 0 {
            return Some("Amount must be positive".to_string());
        }
        None
    }
}
