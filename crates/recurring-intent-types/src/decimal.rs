//! Exact decimal literals.
//!
//! Amounts and thresholds keep their written form until the codec shifts them into integer
//! units, so a value never passes through floating point on its way on-chain.

use std::{fmt, str::FromStr};

use alloy_primitives::U256;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Errors produced when reading a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("empty number")]
    Empty,
    #[error("invalid number `{0}`: expected digits with an optional fractional part, e.g. 10 or 10.5")]
    Malformed(String),
}

/// A non-negative decimal literal of the form `digits[.digits]`.
///
/// The original spelling is preserved for display (`1000.50` stays `1000.50`), while
/// equality compares values: `01.50 == 1.5`.
#[derive(Clone, Debug)]
pub struct Decimal {
    int: String,
    frac: String,
}

impl Decimal {
    pub fn is_zero(&self) -> bool {
        self.int.bytes().chain(self.frac.bytes()).all(|b| b == b'0')
    }

    /// Shift the decimal point `scale` places to the right and return the integer digits.
    ///
    /// The fraction is right-padded with zeros up to `scale` digits; digits beyond `scale`
    /// are dropped (truncation, never rounding).
    pub fn scaled_digits(&self, scale: usize) -> String {
        let mut digits = String::with_capacity(self.int.len() + scale);
        digits.push_str(&self.int);
        if self.frac.len() >= scale {
            digits.push_str(&self.frac[..scale]);
        } else {
            digits.push_str(&self.frac);
            digits.extend(std::iter::repeat('0').take(scale - self.frac.len()));
        }
        digits
    }

    /// True when `scaled_digits(scale)` would drop a non-zero digit.
    pub fn loses_precision_at(&self, scale: usize) -> bool {
        self.frac.len() > scale && self.frac[scale..].bytes().any(|b| b != b'0')
    }

    /// Rebuild a decimal from an integer carrying `scale` implied fractional digits.
    /// Trailing fractional zeros are dropped.
    pub fn from_integer(value: U256, scale: usize) -> Self {
        let digits = value.to_string();
        let mut padded = String::with_capacity(scale + 1);
        if digits.len() <= scale {
            padded.extend(std::iter::repeat('0').take(scale + 1 - digits.len()));
        }
        padded.push_str(&digits);

        let (int, frac) = padded.split_at(padded.len() - scale);
        let int = match int.trim_start_matches('0') {
            "" => "0",
            s => s,
        };
        Self {
            int: int.to_string(),
            frac: frac.trim_end_matches('0').to_string(),
        }
    }

    fn significant(&self) -> (&str, &str) {
        (
            self.int.trim_start_matches('0'),
            self.frac.trim_end_matches('0'),
        )
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Decimal {}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DecimalError::Empty);
        }
        let (int, frac) = match s.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (s, None),
        };
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int) || !frac.map_or(true, all_digits) {
            return Err(DecimalError::Malformed(s.to_string()));
        }
        Ok(Self {
            int: int.to_string(),
            frac: frac.unwrap_or_default().to_string(),
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frac.is_empty() {
            write!(f, "{}", self.int)
        } else {
            write!(f, "{}.{}", self.int, self.frac)
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_accepts_plain_and_fractional() {
        assert_eq!(dec("10").to_string(), "10");
        assert_eq!(dec("1000.50").to_string(), "1000.50");
        assert_eq!(dec("0.5").to_string(), "0.5");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", ".5", "1.", "1,000", "-1", "1.2.3", "1e5", " 1"] {
            assert!(bad.parse::<Decimal>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(dec("1000.50"), dec("1000.5"));
        assert_eq!(dec("007"), dec("7.000"));
        assert_ne!(dec("1.05"), dec("1.5"));
        assert!(dec("0.000").is_zero());
        assert!(!dec("0.001").is_zero());
    }

    #[test]
    fn test_scaled_digits_pads_and_truncates() {
        assert_eq!(dec("10").scaled_digits(6), "10000000");
        assert_eq!(dec("1.5").scaled_digits(2), "150");
        // Excess digits are cut, not rounded.
        assert_eq!(dec("1.239").scaled_digits(2), "123");
        assert!(dec("1.239").loses_precision_at(2));
        assert!(!dec("1.2300").loses_precision_at(2));
    }

    #[test]
    fn test_from_integer_rebuilds_value() {
        let from = |n: u64, scale| Decimal::from_integer(U256::from(n), scale);
        assert_eq!(from(10_000_000, 6), dec("10"));
        assert_eq!(from(5, 6).to_string(), "0.000005");
        assert_eq!(from(100_050, 2).to_string(), "1000.5");
        assert_eq!(from(0, 0).to_string(), "0");
        assert_eq!(
            Decimal::from_integer(U256::from(250_025_000_000u64), 8).to_string(),
            "2500.25"
        );
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&dec("2500.25")).unwrap();
        assert_eq!(json, "\"2500.25\"");
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dec("2500.25"));
        assert!(serde_json::from_str::<Decimal>("\"abc\"").is_err());
    }
}
