//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and address syntax
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProbeConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ProbeConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logging.filter must not be empty")]
    EmptyLogFilter,

    #[error("loopback.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a parsed configuration, collecting every violation.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.logging.filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    if config.loopback.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.loopback.bind_address.clone()));
    }

    let positive = [
        ("loopback.connections", config.loopback.connections as u64),
        ("loopback.quiesce_timeout_ms", config.loopback.quiesce_timeout_ms),
        ("stress.threads", config.stress.threads as u64),
        ("stress.notifications_per_thread", config.stress.notifications_per_thread as u64),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
