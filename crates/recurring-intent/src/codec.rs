//! Exact numeric and fixed-width encodings for constructor arguments.
//!
//! - decimal → smallest token unit (`to_units`)
//! - decimal → 8-digit fixed point (`to_x8`)
//! - symbol → left-justified, zero-padded `bytes32` (`to_bytes32`)
//!
//! Fractional digits beyond the target precision are truncated, never rounded.

use recurring_intent_types::{Decimal, B256, U256};

use crate::errors::CodecError;

/// Fractional digits carried by an X8 fixed-point value.
pub const X8_DECIMALS: u8 = 8;
/// Precision used to compare amounts across tokens.
pub const WAD_DECIMALS: u8 = 18;

pub fn to_units(amount: &Decimal, decimals: u8) -> Result<U256, CodecError> {
    digits_to_u256(&amount.scaled_digits(decimals as usize))
}

pub fn to_x8(value: &Decimal) -> Result<U256, CodecError> {
    to_units(value, X8_DECIMALS)
}

/// Inverse of [`to_units`] for values that were not truncated.
pub fn from_units(units: U256, decimals: u8) -> Decimal {
    Decimal::from_integer(units, decimals as usize)
}

/// UTF-8 bytes of `symbol`, left-justified in 32 bytes. Longer input is cut at 32 bytes.
pub fn to_bytes32(symbol: &str) -> B256 {
    let bytes = symbol.as_bytes();
    let len = bytes.len().min(32);
    let mut buf = [0u8; 32];
    buf[..len].copy_from_slice(&bytes[..len]);
    B256::from(buf)
}

/// Express `units` of a `decimals`-precision token at 18 decimals.
///
/// Tokens with fewer decimals are scaled up exactly; tokens with more are truncated.
pub fn normalize_to_wad(units: U256, decimals: u8) -> Result<U256, CodecError> {
    let overflow = || CodecError::Overflow {
        digits: units.to_string(),
    };
    if decimals <= WAD_DECIMALS {
        let factor = pow10(WAD_DECIMALS - decimals).ok_or_else(overflow)?;
        units.checked_mul(factor).ok_or_else(overflow)
    } else {
        Ok(pow10(decimals - WAD_DECIMALS).map_or(U256::ZERO, |factor| units / factor))
    }
}

pub fn pow10(exp: u8) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

fn digits_to_u256(digits: &str) -> Result<U256, CodecError> {
    U256::from_str_radix(digits, 10).map_err(|_| CodecError::Overflow {
        digits: digits.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_to_units_pads_fraction() {
        assert_eq!(to_units(&dec("10"), 6).unwrap(), U256::from(10_000_000u64));
        assert_eq!(to_units(&dec("1000.50"), 6).unwrap(), U256::from(1_000_500_000u64));
        assert_eq!(to_units(&dec("0.5"), 0).unwrap(), U256::ZERO);
        assert_eq!(
            to_units(&dec("1"), 18).unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_to_units_truncates_never_rounds() {
        assert_eq!(to_units(&dec("1.9999999"), 6).unwrap(), U256::from(1_999_999u64));
        assert_eq!(to_units(&dec("0.0000009"), 6).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_units_round_trip_within_precision() {
        for (text, decimals) in [
            ("10", 6u8),
            ("0.000001", 6),
            ("1000.5", 6),
            ("123456789.123456789012345678", 18),
            ("42", 0),
        ] {
            let units = to_units(&dec(text), decimals).unwrap();
            assert_eq!(from_units(units, decimals), dec(text), "{text} @ {decimals}");
        }
    }

    #[test]
    fn test_to_units_overflow() {
        let huge = dec(&"9".repeat(80));
        assert!(matches!(to_units(&huge, 0), Err(CodecError::Overflow { .. })));
    }

    #[test]
    fn test_to_x8() {
        assert_eq!(to_x8(&dec("3000")).unwrap(), U256::from(300_000_000_000u64));
        assert_eq!(to_x8(&dec("2500.25")).unwrap(), U256::from(250_025_000_000u64));
        assert_eq!(to_x8(&dec("0.123456789")).unwrap(), U256::from(12_345_678u64));
    }

    #[test]
    fn test_to_bytes32() {
        let encoded = to_bytes32("ETH");
        assert_eq!(&encoded[..3], b"ETH");
        assert!(encoded[3..].iter().all(|b| *b == 0));

        let long = "A".repeat(40);
        assert_eq!(to_bytes32(&long).as_slice(), &long.as_bytes()[..32]);
        assert_eq!(to_bytes32(""), B256::ZERO);
    }

    #[test]
    fn test_normalize_to_wad() {
        assert_eq!(
            normalize_to_wad(U256::from(1_000_000u64), 6).unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(normalize_to_wad(U256::from(7u64), 18).unwrap(), U256::from(7u64));
        assert_eq!(normalize_to_wad(U256::from(1_999u64), 21).unwrap(), U256::from(1u64));
        assert!(normalize_to_wad(U256::MAX, 0).is_err());
    }
}
