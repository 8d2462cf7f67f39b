//! Chain-facing types and error definitions.

use thiserror::Error;

// Re-export the config sections so callers don't reach into `config`.
pub use crate::config::schema::{LedgerConfig, ProviderConfig};

/// Errors raised by a wallet provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport or JSON-RPC level failure.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The provider did not answer in time.
    #[error("Provider timeout after {0} seconds")]
    Timeout(u64),

    /// The user declined the request in their wallet (EIP-1193 code 4001).
    #[error("User rejected the request: {0}")]
    UserRejected(String),

    /// The provider answered with something we could not interpret.
    #[error("Invalid provider response for {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

/// Errors raised by the transaction ledger contract client.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// RPC connection or contract call failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Ledger append was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Ledger append was not confirmed in time.
    #[error("Transaction not confirmed after {0} blocks")]
    ConfirmationTimeout(u32),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Unusable RPC URL or contract address.
    #[error("Invalid ledger configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for wallet provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type for ledger calls.
pub type LedgerResult<T> = Result<T, LedgerError>;
