//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::PathEntry;
use crate::storage::{DEFAULT_STORE_PATH, DEFAULT_TABLE};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Declarative rule file selection.
    pub rules: RulesConfig,

    /// Persistent store location and seed entries.
    pub store: StoreConfig,

    /// Built-in redirects held in memory, consulted after the rule file.
    pub static_routes: Vec<PathEntry>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RedirectorConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            rules: RulesConfig::default(),
            store: StoreConfig::default(),
            static_routes: vec![
                PathEntry::new(
                    "/urlshort-godoc",
                    "https://godoc.org/github.com/gophercises/urlshort",
                ),
                PathEntry::new("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
            ],
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Rule file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Path to a `.yaml`, `.yml` or `.json` rule file.
    pub file: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            file: "default.yaml".to_string(),
        }
    }
}

/// Persistent store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store file location.
    pub path: String,

    /// Name of the collection holding the redirects.
    pub table: String,

    /// Entries written at every startup.
    pub seed: Vec<PathEntry>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
            table: DEFAULT_TABLE.to_string(),
            seed: vec![
                PathEntry::new("/apple", "http://www.apple.com"),
                PathEntry::new("/reddit", "http://www.reddit.com"),
            ],
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
