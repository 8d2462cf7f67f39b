//! Bridge error definitions.

use thiserror::Error;

use crate::blockchain::types::{LedgerError, ProviderError};
use crate::blockchain::units::AmountError;
use crate::bridge::cache::CacheError;

/// Errors surfaced by bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The wallet provider failed or declined an account request.
    #[error("Wallet provider unavailable: {0}")]
    ProviderUnavailable(#[source] ProviderError),

    /// Authorization succeeded but returned no account.
    #[error("Wallet returned no accounts")]
    NoAccounts,

    /// A send was attempted without a connected account.
    #[error("No wallet account connected")]
    NotConnected,

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid destination address '{0}'")]
    InvalidAddress(String),

    /// The value transfer was not accepted. No funds moved.
    #[error("Value transfer failed: {0}")]
    Transfer(#[source] ProviderError),

    /// The value transfer went through but its ledger entry did not.
    ///
    /// Nothing is rolled back; `transfer` identifies the moved funds.
    #[error("Value transfer {transfer} succeeded but ledger append failed: {source}")]
    LedgerAppendFailed {
        transfer: String,
        #[source]
        source: LedgerError,
    },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
