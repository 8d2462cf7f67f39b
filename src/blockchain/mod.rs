//! Chain-facing collaborators of the bridge.
//!
//! # Data Flow
//! ```text
//! Wallet provider (injected, EIP-1193 style)
//!     → provider.rs (account discovery, value transfers)
//! Ledger contract
//!     → ledger.rs (read log, append entry, confirm)
//!     → wallet.rs (local signer for appends, key from environment)
//! units.rs converts between decimal ETH strings and wei
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod ledger;
pub mod provider;
pub mod types;
pub mod units;
pub mod wallet;

pub use ledger::{AlloyLedger, ConfirmationStatus, RawTransaction, SubmissionHandle, TransactionLedger};
pub use provider::{HttpWalletProvider, RequestArguments, TransferRequest, WalletProvider};
pub use types::{LedgerError, ProviderError};
pub use wallet::Wallet;
