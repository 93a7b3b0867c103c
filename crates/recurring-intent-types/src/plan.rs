//! Planner output: a validated, chain-ready transfer.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::evm_serde;

/// Largest `decimals` whose `10^decimals` still fits 256 bits.
const MAX_TOKEN_DECIMALS: u8 = 77;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("plan amount must be greater than zero")]
    ZeroAmount,
    #[error("plan period must be greater than zero")]
    ZeroPeriod,
    #[error("plan threshold must be greater than zero")]
    ZeroThreshold,
    #[error("token decimals {0} out of range (max 77)")]
    DecimalsOutOfRange(u8),
}

/// The raw fields of a [`Plan`], as carried on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanParts {
    pub chain: String,
    pub chain_id: u64,
    pub token_sym: String,
    #[serde(with = "evm_serde::address")]
    pub token_addr: Address,
    pub token_decimals: u8,
    #[serde(with = "evm_serde::opt_address")]
    pub owner: Option<Address>,
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

/// A validated plan. Only constructible through [`Plan::new`], so every instance holds
/// a positive amount, period and threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlanParts", into = "PlanParts")]
pub struct Plan {
    parts: PlanParts,
}

impl Plan {
    pub fn new(parts: PlanParts) -> Result<Self, PlanError> {
        if parts.amount_units.is_zero() {
            return Err(PlanError::ZeroAmount);
        }
        if parts.period_seconds == 0 {
            return Err(PlanError::ZeroPeriod);
        }
        if parts.threshold_x8.is_zero() {
            return Err(PlanError::ZeroThreshold);
        }
        if parts.token_decimals > MAX_TOKEN_DECIMALS {
            return Err(PlanError::DecimalsOutOfRange(parts.token_decimals));
        }
        Ok(Self { parts })
    }

    pub fn chain(&self) -> &str {
        &self.parts.chain
    }

    pub fn chain_id(&self) -> u64 {
        self.parts.chain_id
    }

    pub fn token_sym(&self) -> &str {
        &self.parts.token_sym
    }

    pub fn token_addr(&self) -> Address {
        self.parts.token_addr
    }

    pub fn token_decimals(&self) -> u8 {
        self.parts.token_decimals
    }

    pub fn owner(&self) -> Option<Address> {
        self.parts.owner
    }

    pub fn beneficiary(&self) -> Address {
        self.parts.beneficiary
    }

    pub fn amount_units(&self) -> U256 {
        self.parts.amount_units
    }

    pub fn period_seconds(&self) -> u64 {
        self.parts.period_seconds
    }

    pub fn oracle(&self) -> Address {
        self.parts.oracle
    }

    pub fn symbol_bytes32(&self) -> B256 {
        self.parts.symbol_bytes32
    }

    pub fn threshold_x8(&self) -> U256 {
        self.parts.threshold_x8
    }
}

impl TryFrom<PlanParts> for Plan {
    type Error = PlanError;

    fn try_from(parts: PlanParts) -> Result<Self, Self::Error> {
        Self::new(parts)
    }
}

impl From<Plan> for PlanParts {
    fn from(plan: Plan) -> Self {
        plan.parts
    }
}
