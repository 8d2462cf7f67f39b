//! Local signer used for ledger writes.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::blockchain::types::{LedgerError, LedgerResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "WALLET_BRIDGE_PRIVATE_KEY";

/// Signing key for `addToBlockchain` calls.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for EIP-155 replay protection
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> LedgerResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| LedgerError::Wallet(format!("Invalid private key format: {}", e)))?;
        let signer = signer.with_chain_id(Some(chain_id));

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Ledger signer initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `WALLET_BRIDGE_PRIVATE_KEY` from environment.
    pub fn from_env(chain_id: u64) -> LedgerResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            LedgerError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, chain_id)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet signs for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Network wallet for provider construction.
    pub fn to_network_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
