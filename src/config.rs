//! Machine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```rust
//! use tabular_fsm::config::{FsmConfig, ReportPolicy};
//!
//! let config = FsmConfig::from_json(r#"{ "report": "exit_arc", "history_capacity": 16 }"#).unwrap();
//! assert_eq!(config.report, ReportPolicy::ExitArc);
//! assert_eq!(config.history_capacity, 16);
//! assert!(!config.zero_on_destroy);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which `(from, to)` pair a successful run reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPolicy {
    /// The last transition whose handler ran; `to` is the state before EXIT.
    #[default]
    LastTransition,

    /// The final `(EXIT-predecessor, EXIT)` arc.
    ExitArc,
}

/// Per-machine engine settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsmConfig {
    /// Pair reported by a successful run.
    pub report: ReportPolicy,

    /// Validate the whole table at the start of each run and log violations.
    /// Defaults to on in debug builds only.
    pub check_tables: bool,

    /// Clear the name bytes when the metadata is destroyed.
    pub zero_on_destroy: bool,

    /// Number of committed transitions to keep; 0 disables history.
    pub history_capacity: usize,
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self {
            report: ReportPolicy::default(),
            check_tables: cfg!(debug_assertions),
            zero_on_destroy: false,
            history_capacity: 0,
        }
    }
}

impl FsmConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Errors that can occur when loading a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine config: {0}")]
    Parse(#[from] serde_json::Error),
}
