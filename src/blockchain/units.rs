//! Conversion between human-entered ETH amounts and base units (wei).
//!
//! All on-chain values are integers scaled by 10^18. Display values are
//! derived from the exact decimal string, so precision is only lost at the
//! final `f64` step.

use alloy::primitives::utils::{format_ether, parse_ether, UnitsError};
use alloy::primitives::U256;
use thiserror::Error;

/// Gas limit sent with every native value transfer (21000, a plain transfer).
pub const TRANSFER_GAS_LIMIT: &str = "0x5208";

/// Errors produced when parsing a user-entered amount.
#[derive(Debug, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative: {0}")]
    Negative(String),

    #[error("invalid amount '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// Parse a decimal ETH string ("1.5") into wei.
pub fn parse_amount(input: &str) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative(trimmed.to_string()));
    }

    parse_ether(trimmed).map_err(|e: UnitsError| AmountError::Parse {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// Exact decimal ETH representation of a wei value.
pub fn format_amount(wei: U256) -> String {
    format_ether(wei)
}

/// Wei to a display value in ETH.
pub fn to_display_amount(wei: U256) -> f64 {
    format_amount(wei).parse::<f64>().unwrap_or_default()
}

/// Hex quantity encoding used in JSON-RPC params (`0x`-prefixed, no padding).
pub fn to_hex_quantity(value: U256) -> String {
    format!("{value:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_parse_one_and_a_half() {
        let wei = parse_amount("1.5").unwrap();
        assert_eq!(wei, U256::from(WEI_PER_ETH * 3 / 2));
    }

    #[test]
    fn test_display_two_eth() {
        let wei = U256::from(2 * WEI_PER_ETH);
        assert_eq!(to_display_amount(wei), 2.0);
    }

    #[test]
    fn test_round_trip_within_precision() {
        for input in ["0", "0.000000000000000001", "0.01", "1.5", "42", "123456.789"] {
            let wei = parse_amount(input).unwrap();
            let back = parse_amount(&format_amount(wei)).unwrap();
            assert_eq!(wei, back, "round trip failed for {input}");

            let expected: f64 = input.parse().unwrap();
            assert!((to_display_amount(wei) - expected).abs() <= expected * 1e-15);
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(parse_amount(""), Err(AmountError::Empty)));
        assert!(matches!(parse_amount("   "), Err(AmountError::Empty)));
        assert!(matches!(parse_amount("-1"), Err(AmountError::Negative(_))));
        assert!(matches!(parse_amount("abc"), Err(AmountError::Parse { .. })));
    }

    #[test]
    fn test_hex_quantity() {
        assert_eq!(to_hex_quantity(U256::from(21000u64)), TRANSFER_GAS_LIMIT);
        assert_eq!(to_hex_quantity(U256::ZERO), "0x0");
        assert_eq!(
            to_hex_quantity(U256::from(WEI_PER_ETH)),
            "0xde0b6b3a7640000"
        );
    }
}
