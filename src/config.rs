//! Store configuration, loadable from JSON.
//!
//! ```ignore
//! let config = StoreConfig::from_json(r#"{"removal_counting": "removals"}"#)?;
//! let bus = EventBus::with_policy(config.fault_policy);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bus::FaultPolicy;
use crate::collection::RemovalCounting;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid store config: {0}")]
    Parse(String),
}

/// Behavioral switches shared by collections and event buses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Whether `remove` counts every call or only actual removals.
    pub removal_counting: RemovalCounting,
    /// How `emit` reacts to a failing handler.
    pub fault_policy: FaultPolicy,
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
