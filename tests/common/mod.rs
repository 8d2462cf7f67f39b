//! Shared fakes for bridge integration tests.
#![allow(dead_code)]

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use wallet_bridge::blockchain::ledger::{
    ConfirmationStatus, RawTransaction, SubmissionHandle, TransactionLedger,
};
use wallet_bridge::blockchain::provider::{
    RequestArguments, WalletProvider, ETH_ACCOUNTS, ETH_REQUEST_ACCOUNTS, ETH_SEND_TRANSACTION,
};
use wallet_bridge::blockchain::types::{LedgerError, LedgerResult, ProviderError, ProviderResult};
use wallet_bridge::bridge::Notifier;

pub const ALICE: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const BOB: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const TRANSFER_ID: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
pub const LEDGER_TIMESTAMP: u64 = 1_700_000_000;

/// In-memory wallet answering the three methods the bridge uses.
#[derive(Debug, Default)]
pub struct FakeWallet {
    /// Answer to `eth_accounts`.
    pub authorized: Mutex<Vec<String>>,
    /// Granted by `eth_requestAccounts`, then authorized.
    pub grantable: Vec<String>,
    pub reject_authorization: bool,
    pub fail_accounts: bool,
    pub reject_transfer: bool,
    pub requests: Mutex<Vec<RequestArguments>>,
}

impl FakeWallet {
    pub fn connected(account: &str) -> Self {
        Self {
            authorized: Mutex::new(vec![account.to_string()]),
            ..Self::default()
        }
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.method.clone())
            .collect()
    }

    pub fn transfers(&self) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == ETH_SEND_TRANSACTION)
            .map(|r| r.params[0].clone())
            .collect()
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn request(&self, args: RequestArguments) -> ProviderResult<Value> {
        self.requests.lock().unwrap().push(args.clone());

        match args.method.as_str() {
            ETH_ACCOUNTS if self.fail_accounts => Err(ProviderError::Rpc("wallet locked".into())),
            ETH_ACCOUNTS => {
                let accounts = self.authorized.lock().unwrap().clone();
                Ok(json!(accounts))
            }
            ETH_REQUEST_ACCOUNTS if self.reject_authorization => Err(
                ProviderError::UserRejected("User rejected the request.".into()),
            ),
            ETH_REQUEST_ACCOUNTS => {
                *self.authorized.lock().unwrap() = self.grantable.clone();
                Ok(json!(self.grantable))
            }
            ETH_SEND_TRANSACTION if self.reject_transfer => Err(ProviderError::UserRejected(
                "User denied transaction signature.".into(),
            )),
            ETH_SEND_TRANSACTION => Ok(json!(TRANSFER_ID)),
            other => Err(ProviderError::Rpc(format!("unsupported method {other}"))),
        }
    }
}

/// In-memory `Transactions` contract.
#[derive(Debug, Default)]
pub struct FakeLedger {
    pub entries: Mutex<Vec<RawTransaction>>,
    pub fail_reads: AtomicBool,
    pub fail_append: AtomicBool,
    pub revert_append: AtomicBool,
    pub list_reads: AtomicUsize,
    /// When set, appends wait for a notification before returning.
    pub append_gate: Option<Arc<Notify>>,
}

impl FakeLedger {
    pub fn with_entries(entries: Vec<RawTransaction>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionLedger for FakeLedger {
    async fn get_all_transactions(&self) -> LedgerResult<Vec<RawTransaction>> {
        self.list_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::Rpc("node unreachable".into()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn get_transaction_count(&self) -> LedgerResult<u64> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::Rpc("node unreachable".into()));
        }
        Ok(self.len() as u64)
    }

    async fn add_to_blockchain(
        &self,
        receiver: Address,
        amount: U256,
        message: &str,
        keyword: &str,
    ) -> LedgerResult<SubmissionHandle> {
        if let Some(gate) = &self.append_gate {
            gate.notified().await;
        }
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(LedgerError::Rpc("execution reverted".into()));
        }

        let mut entries = self.entries.lock().unwrap();
        entries.push(RawTransaction {
            sender: ALICE.parse().unwrap(),
            receiver,
            amount,
            message: message.to_string(),
            timestamp: LEDGER_TIMESTAMP,
            keyword: keyword.to_string(),
        });
        Ok(SubmissionHandle {
            hash: TxHash::repeat_byte(entries.len() as u8),
        })
    }

    async fn confirm(&self, _handle: &SubmissionHandle) -> LedgerResult<ConfirmationStatus> {
        if self.revert_append.load(Ordering::SeqCst) {
            return Ok(ConfirmationStatus::Failed("Transaction reverted".into()));
        }
        Ok(ConfirmationStatus::Confirmed { block_number: 1 })
    }
}

/// Notifier that remembers what the user would have seen.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
    pub reloads: AtomicUsize,
}

impl RecordingNotifier {
    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn reload_requested(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// A ledger entry from ALICE to BOB.
pub fn entry(eth_wei: u128, message: &str) -> RawTransaction {
    RawTransaction {
        sender: ALICE.parse().unwrap(),
        receiver: BOB.parse().unwrap(),
        amount: U256::from(eth_wei),
        message: message.to_string(),
        timestamp: LEDGER_TIMESTAMP,
        keyword: "test".to_string(),
    }
}
