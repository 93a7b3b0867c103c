//! Compiler output persisted next to the generated contract source.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{evm_serde, plan::Plan};

pub const MANIFEST_VERSION: u32 = 1;

/// Constructor arguments of the generated contract, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorArgs {
    #[serde(with = "evm_serde::opt_address")]
    pub owner: Option<Address>,
    #[serde(with = "evm_serde::address")]
    pub token: Address,
    #[serde(with = "evm_serde::address")]
    pub beneficiary: Address,
    #[serde(with = "evm_serde::u256_dec")]
    pub amount_units: U256,
    pub period_seconds: u64,
    #[serde(with = "evm_serde::address")]
    pub oracle: Address,
    pub symbol_bytes32: B256,
    #[serde(with = "evm_serde::u256_dec")]
    pub threshold_x8: U256,
}

impl From<&Plan> for ConstructorArgs {
    fn from(plan: &Plan) -> Self {
        Self {
            owner: plan.owner(),
            token: plan.token_addr(),
            beneficiary: plan.beneficiary(),
            amount_units: plan.amount_units(),
            period_seconds: plan.period_seconds(),
            oracle: plan.oracle(),
            symbol_bytes32: plan.symbol_bytes32(),
            threshold_x8: plan.threshold_x8(),
        }
    }
}

/// Deployment record for one compile. Written once, never updated; a recompile produces
/// a new manifest with a new `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    version: u32,
    chain: String,
    artifact: String,
    constructor_args: ConstructorArgs,
    created_at: String,
    id: String,
}

impl Manifest {
    pub fn new(
        plan: &Plan,
        artifact: impl Into<String>,
        created_at: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            version: MANIFEST_VERSION,
            chain: plan.chain().to_string(),
            artifact: artifact.into(),
            constructor_args: ConstructorArgs::from(plan),
            created_at: created_at.into(),
            id: id.into(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn constructor_args(&self) -> &ConstructorArgs {
        &self.constructor_args
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}
