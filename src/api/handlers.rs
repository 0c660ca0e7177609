//! API Handlers
//!
//! HTTP request handlers for each demo endpoint.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::cache::{IdempotencyStore, OperationId};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};
use crate::models::{HealthResponse, OperationRequest, OperationResponse, StatsResponse};
use crate::tasks::CancelSignal;

/// Request header carrying the caller's operation identifier
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Response header set to `true` when a stored result is replayed
pub const REPLAYED_HEADER: &str = "idempotent-replayed";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared idempotency store (cheap to clone)
    pub store: IdempotencyStore,
}

impl AppState {
    /// Creates a new AppState around an existing store.
    pub fn new(store: IdempotencyStore) -> Self {
        Self { store }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The store's sweeper stops when `cancel` fires.
    pub fn from_config(
        config: &Config,
        cancel: Option<CancelSignal>,
    ) -> std::result::Result<Self, ConfigError> {
        let store = IdempotencyStore::with_config(config.store_config(), cancel)?;
        Ok(Self::new(store))
    }
}

/// Handler for POST /operations
///
/// Executes the operation once per `Idempotency-Key`. A retry with the same
/// key gets the first execution's response body back unchanged.
///
/// Two simultaneous first attempts with one key may both execute; the store
/// only remembers completed results.
pub async fn operation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<OperationRequest>,
) -> Result<Response> {
    let operation_id = idempotency_key(&headers)?;

    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    if let Some(stored) = state.store.check(operation_id).await {
        debug!(%operation_id, "Replaying stored result");
        return Ok(json_bytes(StatusCode::OK, stored, true));
    }

    let response = OperationResponse::executed(operation_id, req.description, req.amount);
    let body = serde_json::to_vec(&response)?;
    state.store.store(operation_id, body.clone()).await;
    debug!(%operation_id, result_id = %response.result_id, "Executed operation");

    Ok(json_bytes(StatusCode::CREATED, body, false))
}

/// Handler for GET /stats
///
/// Returns current store statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.store.stats().await.into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Parses the `Idempotency-Key` header as a UUID.
fn idempotency_key(headers: &HeaderMap) -> Result<OperationId> {
    let value = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .ok_or(ApiError::MissingIdempotencyKey)?;
    let raw = value
        .to_str()
        .map_err(|_| ApiError::InvalidIdempotencyKey("not valid ASCII".to_string()))?;
    OperationId::parse_str(raw.trim())
        .map_err(|err| ApiError::InvalidIdempotencyKey(err.to_string()))
}

fn json_bytes(status: StatusCode, body: Vec<u8>, replayed: bool) -> Response {
    let replayed = if replayed { "true" } else { "false" };
    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (
                HeaderName::from_static(REPLAYED_HEADER),
                HeaderValue::from_static(replayed),
            ),
        ],
        body,
    )
        .into_response()
}
