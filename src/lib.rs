//! Wallet bridge library.
//!
//! Connects a front end to an injected wallet provider and the
//! `Transactions` ledger contract, and publishes connection, form and
//! history state to subscribers.

pub mod blockchain;
pub mod bridge;
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use bridge::{BridgeSnapshot, WalletBridge};
pub use config::BridgeConfig;
