//! Parser output: the normalized reading of one intent sentence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{decimal::Decimal, destination::Destination, schedule::Schedule};

/// The only action the grammar produces.
pub const SEND_ACTION: &str = "send";

const SYMBOL_LEN: std::ops::RangeInclusive<usize> = 2..=10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("asset symbol \"{0}\" must be 2-10 letters or digits")]
    InvalidAsset(String),
    #[error("condition symbol \"{0}\" must be 2-10 letters or digits")]
    InvalidConditionSymbol(String),
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("threshold must be greater than zero")]
    ZeroThreshold,
    #[error("only `price_gt: true` conditions are supported")]
    UnsupportedComparison,
}

/// Stop condition: the transfer recurs until the price of `symbol` rises above
/// `threshold`.
///
/// Greater-than is the only comparison the generated contract implements, so `price_gt`
/// is always `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCondition {
    pub price_gt: bool,
    pub symbol: String,
    pub threshold: Decimal,
}

/// The raw fields of an [`Intent`], as carried on the wire.
///
/// `action` stays a string; intents can also arrive as JSON and the planner is the
/// component that rejects anything other than `send`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentParts {
    pub action: String,
    pub asset: String,
    pub amount: Decimal,
    pub to: Destination,
    pub schedule: Schedule,
    pub condition: PriceCondition,
}

/// A structured, normalized transfer intent. Symbols are upper-case and 2-10
/// alphanumerics; amount and threshold are positive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntentParts", into = "IntentParts")]
pub struct Intent {
    parts: IntentParts,
}

impl Intent {
    pub fn new(mut parts: IntentParts) -> Result<Self, IntentError> {
        parts.asset = normalize_symbol(&parts.asset).ok_or(IntentError::InvalidAsset(parts.asset.clone()))?;
        parts.condition.symbol = normalize_symbol(&parts.condition.symbol)
            .ok_or(IntentError::InvalidConditionSymbol(parts.condition.symbol.clone()))?;
        if parts.amount.is_zero() {
            return Err(IntentError::ZeroAmount);
        }
        if parts.condition.threshold.is_zero() {
            return Err(IntentError::ZeroThreshold);
        }
        if !parts.condition.price_gt {
            return Err(IntentError::UnsupportedComparison);
        }
        Ok(Self { parts })
    }

    /// Build a `send` intent, upper-casing both symbols.
    pub fn send(
        asset: &str,
        amount: Decimal,
        to: Destination,
        schedule: Schedule,
        condition_symbol: &str,
        threshold: Decimal,
    ) -> Result<Self, IntentError> {
        Self::new(IntentParts {
            action: SEND_ACTION.to_string(),
            asset: asset.to_string(),
            amount,
            to,
            schedule,
            condition: PriceCondition {
                price_gt: true,
                symbol: condition_symbol.to_string(),
                threshold,
            },
        })
    }

    pub fn action(&self) -> &str {
        &self.parts.action
    }

    pub fn asset(&self) -> &str {
        &self.parts.asset
    }

    pub fn amount(&self) -> &Decimal {
        &self.parts.amount
    }

    pub fn to(&self) -> &Destination {
        &self.parts.to
    }

    pub fn schedule(&self) -> Schedule {
        self.parts.schedule
    }

    pub fn condition(&self) -> &PriceCondition {
        &self.parts.condition
    }
}

impl TryFrom<IntentParts> for Intent {
    type Error = IntentError;

    fn try_from(parts: IntentParts) -> Result<Self, Self::Error> {
        Self::new(parts)
    }
}

impl From<Intent> for IntentParts {
    fn from(intent: Intent) -> Self {
        intent.parts
    }
}

fn normalize_symbol(symbol: &str) -> Option<String> {
    (SYMBOL_LEN.contains(&symbol.len()) && symbol.bytes().all(|b| b.is_ascii_alphanumeric()))
        .then(|| symbol.to_ascii_uppercase())
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parts;
        write!(
            f,
            "{} {} {} to {} every {} until {} > {}",
            p.action, p.amount, p.asset, p.to, p.schedule, p.condition.symbol, p.condition.threshold
        )
    }
}
