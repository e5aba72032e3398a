//! Configuration for derived parameter evaluation.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound on world-wrap padding columns.
pub const MAX_WRAP_COLUMNS: usize = 64;

/// Configuration for derived parameter evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedParamConfig {
    /// Columns copied across the longitude seam on each side when a grid
    /// wraps. One column is enough for a 3x3 stencil.
    pub wrap_columns: usize,

    /// Log the duration of every function call at debug level.
    pub log_durations: bool,
}

impl Default for DerivedParamConfig {
    fn default() -> Self {
        Self {
            wrap_columns: 1,
            log_durations: true,
        }
    }
}

impl DerivedParamConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("DERIVPARAM_WRAP_COLUMNS") {
            match val.parse() {
                Ok(columns) => config.wrap_columns = columns,
                Err(_) => warn!(value = %val, "ignoring unparsable DERIVPARAM_WRAP_COLUMNS"),
            }
        }

        if let Ok(val) = std::env::var("DERIVPARAM_LOG_DURATIONS") {
            config.log_durations = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.wrap_columns > MAX_WRAP_COLUMNS {
            return Err(format!("wrap_columns must be <= {}", MAX_WRAP_COLUMNS));
        }

        Ok(())
    }
}
