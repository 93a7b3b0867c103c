//! [`Intent`] → [`Plan`]: allowlisting, name resolution, unit conversion and safety caps.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use recurring_intent_types::{
    destination::parse_address, Destination, Intent, Plan, PlanError, PlanParts, SEND_ACTION,
};
use tracing::{debug, warn};

use crate::{
    codec,
    errors::{RegistryError, ValidationError},
    registry::{ChainInfo, Registry},
    resolver::NameResolver,
};

pub const DEFAULT_CHAIN: &str = "SEPOLIA";
pub const MIN_PERIOD_SECONDS: u64 = 3_600;
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// 10 × 10^20 at 18 decimals (1,000 whole tokens).
pub const DEFAULT_AMOUNT_CAP_WAD: U256 = U256::from_limbs([3_875_820_019_684_212_736, 54, 0, 0]);
/// An X8 threshold must fit an 8-byte slot.
pub const DEFAULT_THRESHOLD_CAP_X8: U256 = U256::from_limbs([u64::MAX, 0, 0, 0]);

#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Registry key of the target chain.
    pub chain: String,
    pub min_period_seconds: u64,
    /// Largest transfer, expressed at 18 decimals.
    pub amount_cap_wad: U256,
    pub threshold_cap_x8: U256,
    /// Deadline for a single name-resolution call.
    pub resolve_timeout: Duration,
    /// Deployer recorded as the contract owner; `None` lets the deployer default apply.
    pub owner: Option<Address>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            chain: DEFAULT_CHAIN.to_string(),
            min_period_seconds: MIN_PERIOD_SECONDS,
            amount_cap_wad: DEFAULT_AMOUNT_CAP_WAD,
            threshold_cap_x8: DEFAULT_THRESHOLD_CAP_X8,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            owner: None,
        }
    }
}

pub struct Planner<R> {
    chain: ChainInfo,
    config: PlannerConfig,
    resolver: R,
}

impl<R: NameResolver> Planner<R> {
    /// Bind a planner to the configured chain of `registry`.
    pub fn new(registry: &Registry, config: PlannerConfig, resolver: R) -> Result<Self, RegistryError> {
        let chain = registry.chain(&config.chain)?.clone();
        Ok(Self {
            chain,
            config,
            resolver,
        })
    }

    /// Validate `intent` and produce a chain-ready plan. Steps run in order and the first
    /// failure is returned.
    pub async fn validate_and_plan(&self, intent: &Intent) -> Result<Plan, ValidationError> {
        if intent.action() != SEND_ACTION {
            return Err(ValidationError::UnsupportedAction(intent.action().to_string()));
        }

        let token_sym = intent.asset().to_string();
        let token = self
            .chain
            .token(&token_sym)
            .ok_or_else(|| ValidationError::TokenNotAllowlisted {
                symbol: token_sym.clone(),
                chain: self.config.chain.clone(),
            })?;

        let beneficiary = self.resolve_beneficiary(intent.to()).await?;

        let cap_exceeded = || ValidationError::AmountExceedsCap {
            amount: intent.amount().to_string(),
        };
        let amount_units = codec::to_units(intent.amount(), token.decimals).map_err(|_| cap_exceeded())?;
        if amount_units.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }
        if intent.amount().loses_precision_at(token.decimals as usize) {
            debug!(amount = %intent.amount(), decimals = token.decimals, "amount truncated to token precision");
        }
        let amount_wad = codec::normalize_to_wad(amount_units, token.decimals).map_err(|_| cap_exceeded())?;
        if amount_wad > self.config.amount_cap_wad {
            return Err(cap_exceeded());
        }

        let period_seconds = intent.schedule().period_seconds();
        if period_seconds < self.config.min_period_seconds {
            return Err(ValidationError::PeriodTooShort {
                period_seconds,
                min_seconds: self.config.min_period_seconds,
            });
        }

        let symbol_bytes32 = codec::to_bytes32(&intent.condition().symbol);
        let threshold = &intent.condition().threshold;
        let too_large = || ValidationError::ThresholdTooLarge {
            threshold: threshold.to_string(),
        };
        let threshold_x8 = codec::to_x8(threshold).map_err(|_| too_large())?;
        if threshold_x8.is_zero() {
            // Below 1e-8.
            return Err(ValidationError::InvalidThreshold);
        }
        if threshold_x8 > self.config.threshold_cap_x8 {
            return Err(too_large());
        }

        let plan = Plan::new(PlanParts {
            chain: self.config.chain.clone(),
            chain_id: self.chain.chain_id,
            token_sym,
            token_addr: token.address,
            token_decimals: token.decimals,
            owner: self.config.owner,
            beneficiary,
            amount_units,
            period_seconds,
            oracle: self.chain.oracle,
            symbol_bytes32,
            threshold_x8,
        })
        .map_err(|err| self.plan_error(err))?;

        debug!(
            chain = plan.chain(),
            token = plan.token_sym(),
            amount_units = %plan.amount_units(),
            period_seconds = plan.period_seconds(),
            "planned intent"
        );
        Ok(plan)
    }

    fn plan_error(&self, err: PlanError) -> ValidationError {
        match err {
            PlanError::ZeroAmount => ValidationError::ZeroAmount,
            PlanError::ZeroPeriod => ValidationError::PeriodTooShort {
                period_seconds: 0,
                min_seconds: self.config.min_period_seconds,
            },
            PlanError::ZeroThreshold => ValidationError::InvalidThreshold,
            // Registries reject such tokens on load.
            PlanError::DecimalsOutOfRange(decimals) => ValidationError::AmountExceedsCap {
                amount: format!("(token with {decimals} decimals)"),
            },
        }
    }

    async fn resolve_beneficiary(&self, to: &Destination) -> Result<Address, ValidationError> {
        let name = match to {
            Destination::Address(address) => return Ok(*address),
            Destination::Name(name) => name,
        };

        let unresolved = |reason: String| {
            warn!(name = %name, reason = %reason, "beneficiary not resolved");
            ValidationError::UnresolvedBeneficiary {
                name: name.clone(),
                reason,
            }
        };

        let answer = tokio::time::timeout(self.config.resolve_timeout, self.resolver.resolve(name))
            .await
            .map_err(|_| {
                unresolved(format!(
                    "resolver timed out after {}ms",
                    self.config.resolve_timeout.as_millis()
                ))
            })?
            .map_err(|err| unresolved(format!("resolver failed: {err}")))?
            .ok_or_else(|| unresolved("no address record".to_string()))?;

        match parse_address(answer.trim()) {
            Some(address) if address != Address::ZERO => {
                debug!(name = %name, address = %address, "resolved beneficiary");
                Ok(address)
            }
            _ => Err(unresolved(format!("resolver returned a malformed address \"{answer}\""))),
        }
    }
}
