//! Bridge state shared with the UI.
//!
//! # States
//! ```text
//! Account:  Disconnected → Connecting → Connected(address)
//!                 ↑______________|  (rejected / no accounts)
//!
//! Send:     Idle → Submitting → Confirming → Idle
//!                      |             |
//!                      └──── error ──┴──→ Idle
//! ```
//!
//! A failure while `Confirming` means the value transfer already went
//! through but the ledger entry did not.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::bridge::records::TransactionRecord;

/// Wallet connection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum AccountState {
    #[default]
    Disconnected,
    Connecting,
    /// Address exactly as the wallet provider returned it.
    Connected(String),
}

impl AccountState {
    /// Connected address, or `""` when there is none.
    pub fn address(&self) -> &str {
        match self {
            AccountState::Connected(address) => address,
            _ => "",
        }
    }
}

/// Progress of a send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendPhase {
    #[default]
    Idle,
    /// Value transfer handed to the wallet provider.
    Submitting,
    /// Ledger append submitted, waiting for it to settle.
    Confirming,
}

/// Keys of the draft transaction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

impl FormField {
    /// Field name as used by front-end inputs.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::AddressTo => "addressTo",
            FormField::Amount => "amount",
            FormField::Keyword => "keyword",
            FormField::Message => "message",
        }
    }
}

/// Draft transaction entered by the user. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    pub address_to: String,
    /// Decimal ETH amount as typed.
    pub amount: String,
    pub keyword: String,
    pub message: String,
}

impl TransactionForm {
    /// Overwrite a single field, leaving the rest untouched.
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::AddressTo => &mut self.address_to,
            FormField::Amount => &mut self.amount,
            FormField::Keyword => &mut self.keyword,
            FormField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::AddressTo => &self.address_to,
            FormField::Amount => &self.amount,
            FormField::Keyword => &self.keyword,
            FormField::Message => &self.message,
        }
    }
}

/// Everything a UI needs to render, published on every change.
///
/// Serializes as the full context value, including the derived
/// `currentAccount` and `isLoading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeSnapshot {
    pub account_state: AccountState,
    pub form_data: TransactionForm,
    pub send_phase: SendPhase,
    /// Last full resync of the ledger, in contract order.
    pub transactions: Vec<TransactionRecord>,
    /// Seeded from the durable cache, updated after each send.
    pub transaction_count: u64,
}

impl BridgeSnapshot {
    pub fn current_account(&self) -> &str {
        self.account_state.address()
    }

    pub fn is_loading(&self) -> bool {
        self.send_phase != SendPhase::Idle
    }
}

impl Serialize for BridgeSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BridgeSnapshot", 7)?;
        state.serialize_field("currentAccount", self.current_account())?;
        state.serialize_field("accountState", &self.account_state)?;
        state.serialize_field("formData", &self.form_data)?;
        state.serialize_field("isLoading", &self.is_loading())?;
        state.serialize_field("sendPhase", &self.send_phase)?;
        state.serialize_field("transactions", &self.transactions)?;
        state.serialize_field("transactionCount", &self.transaction_count)?;
        state.end()
    }
}
