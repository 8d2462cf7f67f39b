//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides `ledger.contract_address` when set.
pub const CONTRACT_ADDRESS_ENV_VAR: &str = "WALLET_BRIDGE_CONTRACT_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration.
///
/// Starts from `path` or the built-in defaults. The contract address is
/// taken from `contract_address`, then [`CONTRACT_ADDRESS_ENV_VAR`], then
/// the file. The result is validated either way.
pub fn resolve_config(
    path: Option<&Path>,
    contract_address: Option<String>,
) -> Result<BridgeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => BridgeConfig::default(),
    };

    let override_address = contract_address.or_else(|| {
        std::env::var(CONTRACT_ADDRESS_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
    });
    if let Some(address) = override_address {
        config.ledger.contract_address = address;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
