//! Serde adapters for EVM values in the JSON documents.
//!
//! Addresses are EIP-55 checksummed (alloy's own impl writes lower-case hex) and 256-bit
//! integers are decimal strings so that JSON consumers never see a lossy number. 32-byte
//! words use alloy's `0x` hex impl directly.

use alloy_primitives::{Address, U256};
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

use crate::destination::parse_address;

pub mod address {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_checksum(None))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).ok_or_else(|| D::Error::custom(format!("invalid address `{s}`")))
    }
}

/// An optional address written as `""` when absent.
pub mod opt_address {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Address>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(address) => serializer.serialize_str(&address.to_checksum(None)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Address>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        parse_address(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid address `{s}`")))
    }
}

pub mod u256_dec {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(D::Error::custom(format!("invalid decimal integer `{s}`")));
        }
        U256::from_str_radix(&s, 10).map_err(D::Error::custom)
    }
}
