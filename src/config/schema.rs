//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a navigator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Location the navigator starts at before any navigation.
    pub initial_path: String,

    /// When a location change re-runs route matching.
    pub match_trigger: MatchTrigger,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            initial_path: "/".to_string(),
            match_trigger: MatchTrigger::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Re-matching policy for location changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTrigger {
    /// Every navigate call and every external navigation re-matches.
    #[default]
    EveryNavigation,

    /// Only a changed pathname re-matches; search/hash-only changes
    /// update the location and leave view, params and loaders alone.
    PathnameChange,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record navigation metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
