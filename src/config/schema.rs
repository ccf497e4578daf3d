//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML and default
//! every field, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for probe scenarios.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Log output settings.
    pub logging: LoggingConfig,

    /// Loopback accept/connect scenario settings.
    pub loopback: LoopbackConfig,

    /// Concurrent notification stress settings.
    pub stress: StressConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "accept_probe=info".to_string(),
        }
    }
}

/// Loopback scenario configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoopbackConfig {
    /// Address the test listener binds to (port 0 picks a free port).
    pub bind_address: String,

    /// Number of client connections to drive through the listener.
    pub connections: usize,

    /// How long to wait for the framework side to quiesce.
    pub quiesce_timeout_ms: u64,
}

impl Default for LoopbackConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_string(),
            connections: 8,
            quiesce_timeout_ms: 5_000,
        }
    }
}

/// Stress scenario configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StressConfig {
    /// Writer threads issuing notifications.
    pub threads: usize,

    /// Notifications each writer issues.
    pub notifications_per_thread: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: 8,
            notifications_per_thread: 2_500,
        }
    }
}
