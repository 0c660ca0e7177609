//! Configuration Module
//!
//! Store tuning (TTL, sweep period) and the demo server settings, loaded from
//! environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

// == Defaults ==
/// Default time a stored result stays retrievable (24 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default interval between sweeper passes
pub const DEFAULT_SWEEP_PERIOD: Duration = Duration::from_millis(100);

/// Default HTTP port for the demo server
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// == Store Config ==
/// Tuning for a single `IdempotencyStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Age after which a stored result is eligible for eviction
    pub ttl: Duration,
    /// How often the background sweeper runs, independent of `ttl`
    pub sweep_period: Duration,
}

impl StoreConfig {
    /// Creates a config with the given TTL and the default sweep period.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sweep_period: DEFAULT_SWEEP_PERIOD,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_sweep_period(mut self, sweep_period: Duration) -> Self {
        self.sweep_period = sweep_period;
        self
    }

    // == Validate ==
    /// Rejects settings the sweeper cannot run with.
    ///
    /// A zero TTL is accepted: every entry becomes sweepable on the next pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_period.is_zero() {
            return Err(ConfigError::ZeroSweepPeriod);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

// == Server Config ==
/// Demo server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in milliseconds for stored results
    pub ttl_ms: u64,
    /// Sweeper interval in milliseconds
    pub sweep_period_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `IDEMPOTENCY_TTL_MS` - Result TTL in milliseconds (default: 86400000)
    /// - `SWEEP_PERIOD_MS` - Sweeper interval in milliseconds (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_ms: env_or("IDEMPOTENCY_TTL_MS", defaults.ttl_ms),
            sweep_period_ms: env_or("SWEEP_PERIOD_MS", defaults.sweep_period_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Store settings derived from this config.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(Duration::from_millis(self.ttl_ms))
            .with_sweep_period(Duration::from_millis(self.sweep_period_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL.as_millis() as u64,
            sweep_period_ms: DEFAULT_SWEEP_PERIOD.as_millis() as u64,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
