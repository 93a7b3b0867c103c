//! Chain and token registry.
//!
//! A static table keyed by chain (e.g. `SEPOLIA`). Loaded once, shared read-only.

use std::{collections::BTreeMap, fs, path::Path};

use alloy_primitives::{address, Address};
use recurring_intent_types::evm_serde;
use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

const MAX_TOKEN_DECIMALS: u8 = 77;

/// Oracle used when a chain has no price feed wired yet.
pub const MOCK_ORACLE: Address = address!("0000000000000000000000000000000000000001");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(with = "evm_serde::address")]
    pub address: Address,
    pub decimals: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    #[serde(with = "evm_serde::address")]
    pub oracle: Address,
    #[serde(default)]
    pub tokens: BTreeMap<String, TokenInfo>,
}

impl ChainInfo {
    /// Look up an allowlisted token; `symbol` is matched upper-cased.
    pub fn token(&self, symbol: &str) -> Option<&TokenInfo> {
        self.tokens.get(&symbol.to_ascii_uppercase())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    chains: BTreeMap<String, ChainInfo>,
}

impl Registry {
    /// The built-in deployment targets.
    pub fn builtin() -> Self {
        let sepolia = ChainInfo {
            chain_id: 11_155_111,
            name: "Sepolia".to_string(),
            rpc_url: "https://sepolia.infura.io/v3/".to_string(),
            oracle: MOCK_ORACLE,
            tokens: BTreeMap::from([(
                "PYUSD".to_string(),
                TokenInfo {
                    address: address!("CaC524BcA292aaade2DF8A05cC58F0a65B1B3bB9"),
                    decimals: 6,
                },
            )]),
        };
        let amoy = ChainInfo {
            chain_id: 80_002,
            name: "Polygon Amoy".to_string(),
            rpc_url: "https://rpc-amoy.polygon.technology/".to_string(),
            oracle: MOCK_ORACLE,
            tokens: BTreeMap::new(),
        };

        Self {
            chains: BTreeMap::from([
                ("SEPOLIA".to_string(), sepolia),
                ("POLYGON_AMOY".to_string(), amoy),
            ]),
        }
    }

    /// Load a registry from JSON: `{ "<CHAIN>": { chainId, name, rpcUrl, oracle, tokens } }`.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let raw: Registry = serde_json::from_str(json)?;
        raw.normalized()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Upper-case token keys and reject decimals whose scale cannot be represented.
    fn normalized(self) -> Result<Self, RegistryError> {
        let mut chains = BTreeMap::new();
        for (key, mut chain) in self.chains {
            let mut tokens = BTreeMap::new();
            for (symbol, token) in chain.tokens {
                if token.decimals > MAX_TOKEN_DECIMALS {
                    return Err(RegistryError::InvalidDecimals {
                        chain: key,
                        symbol,
                        decimals: token.decimals,
                    });
                }
                tokens.insert(symbol.to_ascii_uppercase(), token);
            }
            chain.tokens = tokens;
            chains.insert(key, chain);
        }
        Ok(Self { chains })
    }

    pub fn chain(&self, key: &str) -> Result<&ChainInfo, RegistryError> {
        self.chains
            .get(key)
            .ok_or_else(|| RegistryError::UnknownChain(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pyusd_on_sepolia() {
        let registry = Registry::builtin();
        let chain = registry.chain("SEPOLIA").unwrap();
        assert_eq!(chain.chain_id, 11_155_111);
        assert_eq!(chain.oracle, MOCK_ORACLE);

        let token = chain.token("pyusd").unwrap();
        assert_eq!(token.decimals, 6);
        assert_eq!(
            token.address.to_checksum(None),
            "0xCaC524BcA292aaade2DF8A05cC58F0a65B1B3bB9"
        );
        assert!(registry.chain("POLYGON_AMOY").unwrap().token("PYUSD").is_none());
    }

    #[test]
    fn test_unknown_chain() {
        let err = Registry::builtin().chain("MAINNET").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownChain(ref c) if c == "MAINNET"));
    }

    #[test]
    fn test_from_json_normalizes_symbols() {
        let json = r#"{
            "LOCAL": {
                "chainId": 31337,
                "name": "Anvil",
                "rpcUrl": "http://127.0.0.1:8545",
                "oracle": "0x0000000000000000000000000000000000000002",
                "tokens": {
                    "usdc": { "address": "0x2222222222222222222222222222222222222222", "decimals": 6 }
                }
            }
        }"#;
        let registry = Registry::from_json_str(json).unwrap();
        let local = registry.chain("LOCAL").unwrap();
        assert_eq!(local.token("usdc").unwrap().decimals, 6);
        assert!(local.tokens.contains_key("USDC"));
        assert!(registry.chain("SEPOLIA").is_err());
    }

    #[test]
    fn test_from_json_rejects_oversized_decimals() {
        let json = r#"{
            "LOCAL": {
                "chainId": 1, "name": "x", "rpcUrl": "",
                "oracle": "0x0000000000000000000000000000000000000002",
                "tokens": { "BIG": { "address": "0x2222222222222222222222222222222222222222", "decimals": 80 } }
            }
        }"#;
        assert!(matches!(
            Registry::from_json_str(json),
            Err(RegistryError::InvalidDecimals { decimals: 80, .. })
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(&path, serde_json::to_string(&Registry::builtin()).unwrap()).unwrap();
        assert_eq!(Registry::from_json_file(&path).unwrap(), Registry::builtin());

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Registry::from_json_file(&missing),
            Err(RegistryError::Io { .. })
        ));
    }
}
