//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics. Every problem is
//! reported, not just the first.

use alloy::primitives::Address;
use std::net::SocketAddr;

use crate::config::schema::BridgeConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.provider.enabled {
        check_url(&mut errors, "provider.rpc_url", &config.provider.rpc_url);
        if config.provider.rpc_timeout_secs == 0 {
            errors.push(ValidationError::new("provider.rpc_timeout_secs", "must be > 0"));
        }
    }

    let ledger = &config.ledger;
    check_url(&mut errors, "ledger.rpc_url", &ledger.rpc_url);
    if ledger.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError::new(
            "ledger.contract_address",
            format!("'{}' is not a valid address", ledger.contract_address),
        ));
    }
    if ledger.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("ledger.rpc_timeout_secs", "must be > 0"));
    }
    if ledger.await_confirmation {
        if ledger.confirmation_blocks == 0 {
            errors.push(ValidationError::new("ledger.confirmation_blocks", "must be > 0"));
        }
        if ledger.confirmation_poll_ms == 0 {
            errors.push(ValidationError::new("ledger.confirmation_poll_ms", "must be > 0"));
        }
    }

    // chrono accepts offsets strictly inside one day
    if config.display.utc_offset_secs.abs() >= 86_400 {
        errors.push(ValidationError::new(
            "display.utc_offset_secs",
            "must be within +/- 24 hours",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if let Err(e) = value.parse::<url::Url>() {
        errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e)));
    }
}
