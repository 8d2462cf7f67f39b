//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the wallet bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Wallet provider endpoint.
    pub provider: ProviderConfig,

    /// Ledger contract client.
    pub ledger: LedgerConfig,

    /// Durable count cache.
    pub cache: CacheConfig,

    /// Display formatting.
    pub display: DisplayConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet provider configuration.
///
/// A disabled provider behaves like a browser without a wallet installed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Enable the wallet provider.
    pub enabled: bool,

    /// JSON-RPC endpoint holding the user's accounts.
    pub rpc_url: String,

    /// Request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rpc_url: "http://localhost:8545".to_string(),
            rpc_timeout_secs: 30,
        }
    }
}

/// Ledger contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Sign ledger appends with a local key instead of the node's accounts.
    pub enabled: bool,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Address of the deployed `Transactions` contract.
    pub contract_address: String,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Wait for the ledger append to be mined before finishing a send.
    pub await_confirmation: bool,

    /// Number of block confirmations required.
    pub confirmation_blocks: u32,

    /// Upper bound on the confirmation wait in seconds.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub confirmation_poll_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: String::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            await_confirmation: true,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 120,
            confirmation_poll_ms: 2000,
        }
    }
}

/// Durable cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// JSON file backing the cache. `None` keeps it in memory only.
    pub path: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: Some("wallet-bridge-cache.json".to_string()),
        }
    }
}

/// Display formatting for transaction records.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Offset from UTC applied to record timestamps, in seconds.
    pub utc_offset_secs: i32,
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
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
