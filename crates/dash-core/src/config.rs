//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the gateway. Request
//! handling never reads environment variables.

use crate::constants::{DEFAULT_BROADCAST_CAPACITY, MAX_BROADCAST_CAPACITY};
use crate::{DashboardError, DashboardResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    broadcast_capacity: usize,
    seed_fixtures: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            seed_fixtures: true,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidInput`] if `broadcast_capacity` is zero or above
    /// [`MAX_BROADCAST_CAPACITY`].
    pub fn new(broadcast_capacity: usize, seed_fixtures: bool) -> DashboardResult<Self> {
        if broadcast_capacity == 0 {
            return Err(DashboardError::InvalidInput(
                "broadcast capacity must be greater than zero".into(),
            ));
        }
        if broadcast_capacity > MAX_BROADCAST_CAPACITY {
            return Err(DashboardError::InvalidInput(format!(
                "broadcast capacity {} exceeds the maximum of {}",
                broadcast_capacity, MAX_BROADCAST_CAPACITY
            )));
        }

        Ok(Self {
            broadcast_capacity,
            seed_fixtures,
        })
    }

    pub fn broadcast_capacity(&self) -> usize {
        self.broadcast_capacity
    }

    /// Whether the store starts with the fixture doctors and visit statistics.
    pub fn seed_fixtures(&self) -> bool {
        self.seed_fixtures
    }
}

/// Parse the broadcast capacity from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_BROADCAST_CAPACITY`].
pub fn broadcast_capacity_from_env_value(value: Option<String>) -> DashboardResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_BROADCAST_CAPACITY),
        Some(v) => v.parse::<usize>().map_err(|e| {
            DashboardError::InvalidInput(format!("invalid broadcast capacity '{}': {}", v, e))
        }),
    }
}

/// Parse a boolean flag from an optional string value.
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off` in any case. Missing or blank values
/// yield `default`.
pub fn flag_from_env_value(value: Option<String>, default: bool) -> DashboardResult<bool> {
    let Some(raw) = value else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(DashboardError::InvalidInput(format!(
            "invalid boolean flag '{}'",
            other
        ))),
    }
}
