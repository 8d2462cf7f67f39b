//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → contract address override (CLI flag, then environment)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → used to build the provider, ledger and cache
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, CONTRACT_ADDRESS_ENV_VAR};
pub use schema::{
    BridgeConfig, CacheConfig, DisplayConfig, LedgerConfig, ObservabilityConfig, ProviderConfig,
};
