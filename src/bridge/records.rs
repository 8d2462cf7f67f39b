//! Display-shaped transaction records.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::blockchain::ledger::RawTransaction;
use crate::blockchain::units::to_display_amount;

/// Display format for record timestamps, e.g. `11/14/2023, 10:13:20 PM`.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A ledger entry shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub address_from: String,
    pub address_to: String,
    pub timestamp: String,
    pub message: String,
    pub keyword: String,
    /// Amount in ETH.
    pub amount: f64,
}

/// Converts raw ledger entries into [`TransactionRecord`]s.
#[derive(Debug, Clone, Copy)]
pub struct RecordFormatter {
    offset: FixedOffset,
}

impl RecordFormatter {
    /// Formatter rendering timestamps at a fixed UTC offset.
    ///
    /// Out-of-range offsets fall back to UTC.
    pub fn new(utc_offset_secs: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_secs).unwrap_or_else(|| {
            tracing::warn!(utc_offset_secs, "Invalid UTC offset, using UTC");
            utc()
        });
        Self { offset }
    }

    pub fn format_timestamp(&self, secs: u64) -> String {
        i64::try_from(secs)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.with_timezone(&self.offset).format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| secs.to_string())
    }

    pub fn to_record(&self, raw: &RawTransaction) -> TransactionRecord {
        TransactionRecord {
            address_from: raw.sender.to_string(),
            address_to: raw.receiver.to_string(),
            timestamp: self.format_timestamp(raw.timestamp),
            message: raw.message.clone(),
            keyword: raw.keyword.clone(),
            amount: to_display_amount(raw.amount),
        }
    }
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self { offset: utc() }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}
