//! The bridge between a UI, a wallet provider and the ledger contract.
//!
//! # Responsibilities
//! - Track the connected account and the draft transaction form
//! - Resync the ledger transaction list
//! - Mirror the ledger count into the durable cache
//! - Run the two-step send: value transfer, then ledger append

use alloy::primitives::{Address, TxHash};
use std::sync::Arc;
use tokio::sync::watch;

use crate::blockchain::ledger::{ConfirmationStatus, TransactionLedger};
use crate::blockchain::provider::{TransferRequest, WalletProvider};
use crate::blockchain::types::LedgerError;
use crate::blockchain::units::{parse_amount, to_hex_quantity, TRANSFER_GAS_LIMIT};
use crate::bridge::cache::KeyValueCache;
use crate::bridge::error::{BridgeError, BridgeResult};
use crate::bridge::notifier::{LogNotifier, Notifier, NO_WALLET_ALERT};
use crate::bridge::records::{RecordFormatter, TransactionRecord};
use crate::bridge::state::{AccountState, BridgeSnapshot, FormField, SendPhase, TransactionForm};
use crate::bridge::store::BridgeStore;
use crate::observability::metrics;

/// Outcome of a completed send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Transaction id returned by the wallet for the value transfer.
    pub transfer_id: String,
    /// Hash of the ledger append.
    pub ledger_hash: TxHash,
    pub confirmation: ConfirmationStatus,
    /// Ledger count read after the append, or the previous in-memory
    /// count when that read failed.
    pub transaction_count: u64,
}

/// Stateful adapter exposing wallet and ledger state to a UI.
///
/// Methods take `&self` and may overlap; state writes are last-write-wins.
#[derive(Debug)]
pub struct WalletBridge {
    provider: Option<Arc<dyn WalletProvider>>,
    ledger: Arc<dyn TransactionLedger>,
    cache: KeyValueCache,
    notifier: Arc<dyn Notifier>,
    formatter: RecordFormatter,
    store: BridgeStore,
}

impl WalletBridge {
    /// Create a bridge. A `None` provider means no wallet is installed.
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        ledger: Arc<dyn TransactionLedger>,
        cache: KeyValueCache,
    ) -> Self {
        let store = BridgeStore::new(initial_snapshot(&cache));
        Self {
            provider,
            ledger,
            cache,
            notifier: Arc::new(LogNotifier),
            formatter: RecordFormatter::default(),
            store,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_formatter(mut self, formatter: RecordFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn snapshot(&self) -> BridgeSnapshot {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<BridgeSnapshot> {
        self.store.subscribe()
    }

    /// Connected address, or `""`.
    pub fn current_account(&self) -> String {
        self.store.snapshot().current_account().to_string()
    }

    pub fn is_loading(&self) -> bool {
        self.store.snapshot().is_loading()
    }

    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.store.snapshot().transactions
    }

    pub fn form(&self) -> TransactionForm {
        self.store.snapshot().form_data
    }

    /// Startup sequence: detect an existing connection and refresh the
    /// cached count, concurrently.
    pub async fn mount(&self) -> BridgeResult<()> {
        let (connection, count) =
            tokio::join!(self.check_connection(), self.refresh_transaction_count());
        connection?;
        count.map(|_| ())
    }

    /// Adopt an already-authorized account without prompting the user.
    pub async fn check_connection(&self) -> BridgeResult<()> {
        let Some(provider) = self.provider.as_ref() else {
            self.notifier.alert(NO_WALLET_ALERT);
            return Ok(());
        };

        let accounts = provider.accounts().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to query authorized accounts");
            metrics::record_operation("check_connection", false);
            BridgeError::ProviderUnavailable(e)
        })?;

        match accounts.into_iter().next() {
            Some(account) => {
                tracing::info!(account = %account, "Found authorized account");
                self.store
                    .update(|s| s.account_state = AccountState::Connected(account));
                self.refresh_transactions().await;
            }
            None => tracing::info!("No authorized accounts found"),
        }

        metrics::record_operation("check_connection", true);
        Ok(())
    }

    /// Ask the user to authorize an account, then reload.
    pub async fn connect_wallet(&self) -> BridgeResult<()> {
        let Some(provider) = self.provider.as_ref() else {
            self.notifier.alert(NO_WALLET_ALERT);
            return Ok(());
        };

        let previous = self.store.snapshot().account_state;
        self.store.update(|s| s.account_state = AccountState::Connecting);

        let account = match provider.request_accounts().await {
            Ok(accounts) => accounts.into_iter().next(),
            Err(e) => {
                tracing::error!(error = %e, "Account request failed");
                self.store.update(|s| s.account_state = previous);
                metrics::record_operation("connect_wallet", false);
                return Err(BridgeError::ProviderUnavailable(e));
            }
        };

        let Some(account) = account else {
            tracing::warn!("Account request returned no accounts");
            self.store.update(|s| s.account_state = previous);
            metrics::record_operation("connect_wallet", false);
            return Err(BridgeError::NoAccounts);
        };

        tracing::info!(account = %account, "Wallet connected");
        self.store
            .update(|s| s.account_state = AccountState::Connected(account));
        metrics::record_operation("connect_wallet", true);

        // The account is already adopted; notify even if re-mounting fails.
        let reloaded = self.reload().await;
        self.notifier.reload_requested();
        reloaded
    }

    /// Discard in-memory state and run the startup sequence again.
    ///
    /// Only the durable cache survives.
    pub async fn reload(&self) -> BridgeResult<()> {
        tracing::debug!("Reloading bridge state");
        self.store.replace(initial_snapshot(&self.cache));
        self.mount().await
    }

    /// Replace the transaction list with a full read of the ledger.
    ///
    /// Failures are logged and the previous list is kept.
    pub async fn refresh_transactions(&self) {
        if self.provider.is_none() {
            tracing::info!("No wallet provider present, skipping transaction refresh");
            return;
        }

        match self.ledger.get_all_transactions().await {
            Ok(raw) => {
                let records: Vec<TransactionRecord> =
                    raw.iter().map(|tx| self.formatter.to_record(tx)).collect();
                tracing::debug!(count = records.len(), "Loaded ledger transactions");
                metrics::record_transactions_loaded(records.len());
                metrics::record_operation("refresh_transactions", true);
                self.store.update(|s| s.transactions = records);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load ledger transactions");
                metrics::record_operation("refresh_transactions", false);
            }
        }
    }

    /// Read the ledger count into the durable cache.
    ///
    /// The in-memory count is left alone. Returns `None` without a provider.
    pub async fn refresh_transaction_count(&self) -> BridgeResult<Option<u64>> {
        if self.provider.is_none() {
            return Ok(None);
        }

        let result = async {
            let count = self.ledger.get_transaction_count().await?;
            self.cache.set_transaction_count(count)?;
            Ok::<_, BridgeError>(count)
        }
        .await;

        match result {
            Ok(count) => {
                tracing::debug!(count, "Cached ledger transaction count");
                metrics::record_operation("refresh_transaction_count", true);
                Ok(Some(count))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh transaction count");
                metrics::record_operation("refresh_transaction_count", false);
                Err(e)
            }
        }
    }

    /// Change one form field.
    pub fn update_form_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        tracing::trace!(field = field.name(), "Form field updated");
        self.store.update(|s| s.form_data.set(field, value));
    }

    /// Replace the whole form.
    pub fn set_form(&self, form: TransactionForm) {
        self.store.update(|s| s.form_data = form);
    }

    /// Send the drafted transfer and record it on the ledger.
    ///
    /// Returns `Ok(None)` when no wallet is installed. The form is kept as is
    /// afterwards.
    pub async fn send_transaction(&self) -> BridgeResult<Option<SendReceipt>> {
        let Some(provider) = self.provider.as_ref() else {
            self.notifier.alert(NO_WALLET_ALERT);
            return Ok(None);
        };

        let result = self.run_send(provider.as_ref()).await;
        match &result {
            Ok(receipt) => {
                tracing::info!(
                    transfer = %receipt.transfer_id,
                    ledger_hash = %receipt.ledger_hash,
                    "Transaction sent"
                );
                metrics::record_send("ok");
            }
            Err(BridgeError::LedgerAppendFailed { transfer, source }) => {
                tracing::error!(
                    transfer = %transfer,
                    error = %source,
                    "Funds moved without a ledger entry"
                );
                metrics::record_send("partial");
            }
            Err(e) => {
                tracing::error!(error = %e, "Transaction send failed");
                metrics::record_send("error");
            }
        }
        result.map(Some)
    }

    async fn run_send(&self, provider: &dyn WalletProvider) -> BridgeResult<SendReceipt> {
        let snapshot = self.store.snapshot();
        let form = snapshot.form_data;
        let AccountState::Connected(from) = snapshot.account_state else {
            return Err(BridgeError::NotConnected);
        };

        // Validate everything before any funds can move.
        let receiver: Address = form
            .address_to
            .trim()
            .parse()
            .map_err(|_| BridgeError::InvalidAddress(form.address_to.clone()))?;
        let amount = parse_amount(&form.amount)?;

        let phase = PhaseGuard::enter(&self.store, SendPhase::Submitting);

        let transfer = TransferRequest {
            from,
            to: receiver.to_string(),
            gas: TRANSFER_GAS_LIMIT.to_string(),
            value: to_hex_quantity(amount),
        };
        let transfer_id = provider
            .send_transaction(&transfer)
            .await
            .map_err(BridgeError::Transfer)?;
        tracing::info!(transfer = %transfer_id, value = %transfer.value, "Value transfer accepted");

        phase.advance(SendPhase::Confirming);
        let partial = |source: LedgerError| BridgeError::LedgerAppendFailed {
            transfer: transfer_id.clone(),
            source,
        };

        let handle = self
            .ledger
            .add_to_blockchain(receiver, amount, &form.message, &form.keyword)
            .await
            .map_err(partial)?;
        tracing::info!(hash = %handle.hash, "Loading");

        let confirmation = match self.ledger.confirm(&handle).await.map_err(partial)? {
            ConfirmationStatus::Failed(reason) => {
                return Err(partial(LedgerError::Reverted(reason)));
            }
            status => status,
        };
        tracing::info!(hash = %handle.hash, status = ?confirmation, "Successfully loaded");
        drop(phase);

        // The send is complete here; a failed read only leaves the count stale.
        let transaction_count = match self.ledger.get_transaction_count().await {
            Ok(count) => {
                self.store.update(|s| s.transaction_count = count);
                count
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to refresh transaction count after send");
                metrics::record_operation("refresh_transaction_count", false);
                self.store.snapshot().transaction_count
            }
        };

        Ok(SendReceipt {
            transfer_id,
            ledger_hash: handle.hash,
            confirmation,
            transaction_count,
        })
    }
}

fn initial_snapshot(cache: &KeyValueCache) -> BridgeSnapshot {
    BridgeSnapshot {
        transaction_count: cache.transaction_count().unwrap_or_default(),
        ..BridgeSnapshot::default()
    }
}

/// Holds the send phase and returns it to `Idle` when dropped, whether the
/// send finished, failed or was cancelled.
struct PhaseGuard<'a> {
    store: &'a BridgeStore,
}

impl<'a> PhaseGuard<'a> {
    fn enter(store: &'a BridgeStore, phase: SendPhase) -> Self {
        store.update(|s| s.send_phase = phase);
        Self { store }
    }

    fn advance(&self, phase: SendPhase) {
        self.store.update(|s| s.send_phase = phase);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.store.update(|s| s.send_phase = SendPhase::Idle);
    }
}
