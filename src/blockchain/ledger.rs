//! Client for the on-chain `Transactions` ledger contract.
//!
//! # Responsibilities
//! - Declare the contract ABI
//! - Read the full transaction log and its length
//! - Append a log entry after a value transfer
//! - Monitor confirmation of the append

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::types::{LedgerConfig, LedgerError, LedgerResult};
use crate::blockchain::wallet::Wallet;

sol! {
    /// Append-only log of transfers made through the bridge.
    #[sol(rpc)]
    contract Transactions {
        struct TransferStruct {
            address sender;
            address receiver;
            uint256 amount;
            string message;
            uint256 timestamp;
            string keyword;
        }

        function addToBlockchain(address receiver, uint256 amount, string memory message, string memory keyword) public;
        function getAllTransactions() public view returns (TransferStruct[] memory);
        function getTransactionCount() public view returns (uint256);
    }
}

/// A ledger entry as stored on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub sender: Address,
    pub receiver: Address,
    /// Amount in wei.
    pub amount: U256,
    pub message: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub keyword: String,
}

impl From<Transactions::TransferStruct> for RawTransaction {
    fn from(raw: Transactions::TransferStruct) -> Self {
        Self {
            sender: raw.sender,
            receiver: raw.receiver,
            amount: raw.amount,
            message: raw.message,
            timestamp: raw.timestamp.saturating_to::<u64>(),
            keyword: raw.keyword,
        }
    }
}

/// Handle for a submitted ledger append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionHandle {
    pub hash: TxHash,
}

/// Ledger append confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Submitted; confirmation was not awaited.
    Pending,
    /// Mined with the required block depth.
    Confirmed { block_number: u64 },
    /// Reverted or dropped.
    Failed(String),
}

/// Typed handle to the deployed ledger contract.
#[async_trait]
pub trait TransactionLedger: Send + Sync + std::fmt::Debug {
    /// Every ledger entry, in contract insertion order.
    async fn get_all_transactions(&self) -> LedgerResult<Vec<RawTransaction>>;

    /// Number of ledger entries.
    async fn get_transaction_count(&self) -> LedgerResult<u64>;

    /// Append an entry describing a transfer.
    async fn add_to_blockchain(
        &self,
        receiver: Address,
        amount: U256,
        message: &str,
        keyword: &str,
    ) -> LedgerResult<SubmissionHandle>;

    /// Wait for an append to settle. The default does not wait.
    async fn confirm(&self, _handle: &SubmissionHandle) -> LedgerResult<ConfirmationStatus> {
        Ok(ConfirmationStatus::Pending)
    }
}

/// Contract client over an alloy HTTP provider.
pub struct AlloyLedger {
    contract: Transactions::TransactionsInstance<DynProvider>,
    config: LedgerConfig,
    timeout_duration: Duration,
}

impl AlloyLedger {
    /// Create a ledger client.
    ///
    /// Without a `wallet`, writes are delegated to the node's own accounts.
    pub fn new(config: LedgerConfig, wallet: Option<&Wallet>) -> LedgerResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            LedgerError::InvalidConfig(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let address: Address = config.contract_address.parse().map_err(|e| {
            LedgerError::InvalidConfig(format!(
                "Invalid contract address '{}': {}",
                config.contract_address, e
            ))
        })?;

        let provider = match wallet {
            Some(wallet) => ProviderBuilder::new()
                .wallet(wallet.to_network_wallet())
                .connect_http(url)
                .erased(),
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        tracing::info!(
            rpc_url = %config.rpc_url,
            contract = %address,
            signer = ?wallet.map(Wallet::address),
            "Ledger client initialized"
        );

        Ok(Self {
            contract: Transactions::new(address, provider),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        })
    }

    async fn with_timeout<T, E, F>(&self, fut: F) -> LedgerResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(LedgerError::Rpc(e.to_string())),
            Err(_) => Err(LedgerError::Timeout(self.config.rpc_timeout_secs)),
        }
    }
}

#[async_trait]
impl TransactionLedger for AlloyLedger {
    async fn get_all_transactions(&self) -> LedgerResult<Vec<RawTransaction>> {
        let call = self.contract.getAllTransactions();
        let raw = self.with_timeout(call.call()).await?;
        Ok(raw.into_iter().map(RawTransaction::from).collect())
    }

    async fn get_transaction_count(&self) -> LedgerResult<u64> {
        let call = self.contract.getTransactionCount();
        let count = self.with_timeout(call.call()).await?;
        Ok(count.saturating_to::<u64>())
    }

    async fn add_to_blockchain(
        &self,
        receiver: Address,
        amount: U256,
        message: &str,
        keyword: &str,
    ) -> LedgerResult<SubmissionHandle> {
        let call = self.contract.addToBlockchain(
            receiver,
            amount,
            message.to_string(),
            keyword.to_string(),
        );
        let pending = self.with_timeout(call.send()).await?;
        Ok(SubmissionHandle {
            hash: *pending.tx_hash(),
        })
    }

    async fn confirm(&self, handle: &SubmissionHandle) -> LedgerResult<ConfirmationStatus> {
        if !self.config.await_confirmation {
            return Ok(ConfirmationStatus::Pending);
        }

        let provider = self.contract.provider();
        let required_confirmations = self.config.confirmation_blocks;
        let poll_interval = Duration::from_millis(self.config.confirmation_poll_ms);
        let tx_hash = handle.hash;

        let result = timeout(
            Duration::from_secs(self.config.confirmation_timeout_secs),
            async {
                let mut ticker = interval(poll_interval);

                loop {
                    ticker.tick().await;

                    let receipt = match self
                        .with_timeout(provider.get_transaction_receipt(tx_hash))
                        .await?
                    {
                        Some(r) => r,
                        None => {
                            tracing::debug!(tx_hash = %tx_hash, "Ledger append pending");
                            continue;
                        }
                    };

                    if !receipt.status() {
                        return Ok(ConfirmationStatus::Failed(
                            "Transaction reverted".to_string(),
                        ));
                    }

                    let current_block = self.with_timeout(provider.get_block_number()).await?;
                    let tx_block = receipt.block_number.unwrap_or(current_block);
                    // The inclusion block counts as the first confirmation.
                    let confirmations = current_block.saturating_sub(tx_block) as u32 + 1;

                    if confirmations >= required_confirmations {
                        return Ok(ConfirmationStatus::Confirmed {
                            block_number: tx_block,
                        });
                    }

                    tracing::debug!(
                        tx_hash = %tx_hash,
                        confirmations = confirmations,
                        required = required_confirmations,
                        "Waiting for confirmations"
                    );
                }
            },
        )
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(LedgerError::ConfirmationTimeout(required_confirmations)),
        }
    }
}

impl std::fmt::Debug for AlloyLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyLedger")
            .field("rpc_url", &self.config.rpc_url)
            .field("contract", self.contract.address())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
