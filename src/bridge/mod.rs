//! Wallet bridge subsystem.
//!
//! # Data Flow
//! ```text
//! UI input → WalletBridge operations
//!     → blockchain::provider (accounts, value transfer)
//!     → blockchain::ledger (history, count, append)
//!     → records.rs (display shaping)
//!     → store.rs (publish BridgeSnapshot to subscribers)
//!     → cache.rs (durable transaction count)
//! ```

pub mod cache;
pub mod error;
pub mod notifier;
pub mod records;
pub mod state;
pub mod store;
pub mod wallet_bridge;

pub use cache::{KeyValueCache, TRANSACTION_COUNT_KEY};
pub use error::{BridgeError, BridgeResult};
pub use notifier::{LogNotifier, Notifier, NO_WALLET_ALERT};
pub use records::{RecordFormatter, TransactionRecord};
pub use state::{AccountState, BridgeSnapshot, FormField, SendPhase, TransactionForm};
pub use store::BridgeStore;
pub use wallet_bridge::{SendReceipt, WalletBridge};
