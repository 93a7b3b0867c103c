//! Transfer destinations: a raw EVM address or a name-service identifier.

use std::{fmt, str::FromStr};

use alloy_primitives::Address;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Top-level label every name-service identifier must end with.
pub const NAME_SUFFIX: &str = "eth";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid beneficiary `{0}`: use a 0x-address or a name ending with .eth (e.g. alice.eth)")]
pub struct DestinationError(pub String);

/// Where a transfer goes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    /// `0x` followed by exactly 40 hex digits.
    Address(Address),
    /// Lower-cased, dot-delimited labels ending in `.eth`; must be resolved before planning.
    Name(String),
}

impl Destination {
    /// Classify a trimmed destination string, or `None` if it has neither shape.
    pub fn classify(raw: &str) -> Option<Self> {
        if let Some(address) = parse_address(raw) {
            return Some(Self::Address(address));
        }
        let lowered = raw.to_ascii_lowercase();
        is_name(&lowered).then_some(Self::Name(lowered))
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            Self::Name(_) => None,
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }
}

/// Parse `0x` + 40 hex digits (any letter case) into an address.
pub fn parse_address(s: &str) -> Option<Address> {
    let digits = s.strip_prefix("0x")?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex::decode(digits).ok()?;
    Some(Address::from_slice(&bytes))
}

fn is_name(s: &str) -> bool {
    let labels: Vec<&str> = s.split('.').collect();
    labels.len() >= 2
        && labels.last() == Some(&NAME_SUFFIX)
        && labels.iter().all(|label| {
            !label.is_empty()
                && label
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        })
}

impl FromStr for Destination {
    type Err = DestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::classify(s.trim()).ok_or_else(|| DestinationError(s.to_string()))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => f.write_str(&address.to_checksum(None)),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_address() {
        let d = Destination::classify("0x1111111111111111111111111111111111111111").unwrap();
        assert_eq!(d.as_address(), Some(Address::repeat_byte(0x11)));
        assert!(!d.is_name());
    }

    #[test]
    fn test_classify_name_is_case_insensitive() {
        assert_eq!(
            Destination::classify("Alice.ETH"),
            Some(Destination::Name("alice.eth".into()))
        );
        assert_eq!(
            Destination::classify("pay.vitalik-2.eth"),
            Some(Destination::Name("pay.vitalik-2.eth".into()))
        );
    }

    #[test]
    fn test_classify_rejects_other_shapes() {
        for bad in [
            "alice",
            "alice.com",
            ".eth",
            "alice..eth",
            "0x1234",
            "0x111111111111111111111111111111111111111g",
            "1111111111111111111111111111111111111111",
            "alice_bob.eth",
        ] {
            assert!(Destination::classify(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_display_checksums_addresses() {
        let d: Destination = "0xcac524bca292aaade2df8a05cc58f0a65b1b3bb9".parse().unwrap();
        assert_eq!(d.to_string(), "0xCaC524BcA292aaade2DF8A05cC58F0a65B1B3bB9");
    }

    #[test]
    fn test_serde_round_trip_as_plain_string() {
        let d = Destination::Name("alice.eth".into());
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"alice.eth\"");
        assert!(serde_json::from_str::<Destination>("\"bob\"").is_err());
    }
}
