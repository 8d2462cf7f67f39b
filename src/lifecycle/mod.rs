//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build provider, ledger, cache → WalletBridge → mount
//! ```
//!
//! # Design Decisions
//! - Fail fast on broken configuration (bad URLs, bad contract address)
//! - A disabled provider is not an error; the bridge runs wallet-less

pub mod startup;

pub use startup::{build_bridge, StartupError};
