//! Startup orchestration.

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::ledger::{AlloyLedger, TransactionLedger};
use crate::blockchain::provider::{HttpWalletProvider, WalletProvider};
use crate::blockchain::types::{LedgerError, ProviderError};
use crate::blockchain::wallet::Wallet;
use crate::bridge::cache::KeyValueCache;
use crate::bridge::records::RecordFormatter;
use crate::bridge::wallet_bridge::WalletBridge;
use crate::config::BridgeConfig;

/// Errors that prevent the bridge from being built.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to initialize wallet provider: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to initialize ledger client: {0}")]
    Ledger(#[from] LedgerError),
}

/// Build a bridge from configuration. Nothing is mounted yet.
pub fn build_bridge(config: &BridgeConfig) -> Result<WalletBridge, StartupError> {
    let provider: Option<Arc<dyn WalletProvider>> = if config.provider.enabled {
        Some(Arc::new(HttpWalletProvider::new(config.provider.clone())?))
    } else {
        tracing::info!("Wallet provider disabled");
        None
    };

    let wallet = if config.ledger.enabled {
        Some(Wallet::from_env(config.ledger.chain_id)?)
    } else {
        None
    };
    let ledger: Arc<dyn TransactionLedger> =
        Arc::new(AlloyLedger::new(config.ledger.clone(), wallet.as_ref())?);

    let cache = match &config.cache.path {
        Some(path) => KeyValueCache::open(Path::new(path)),
        None => KeyValueCache::in_memory(),
    };

    Ok(WalletBridge::new(provider, ledger, cache)
        .with_formatter(RecordFormatter::new(config.display.utc_offset_secs)))
}
