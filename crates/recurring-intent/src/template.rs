//! Contract source template with `{{placeholder}}` markers.
//!
//! Placeholders are checked when the template is loaded, so rendering a [`Plan`] is a
//! pure, infallible substitution.

use std::{fs, path::Path};

use recurring_intent_types::Plan;

use crate::errors::TemplateError;

/// File stem of every generated contract.
pub const ARTIFACT_STEM: &str = "ConditionalRecurringIntent";

const BUILTIN_SOURCE: &str = include_str!("../templates/ConditionalRecurringIntent.sol.tpl");

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A value the template can pull from a [`Plan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    Owner,
    Token,
    TokenSym,
    Beneficiary,
    AmountUnits,
    PeriodSeconds,
    Oracle,
    SymbolBytes32,
    ThresholdX8,
    Chain,
    ChainId,
}

impl Placeholder {
    pub const ALL: [Placeholder; 11] = [
        Self::Owner,
        Self::Token,
        Self::TokenSym,
        Self::Beneficiary,
        Self::AmountUnits,
        Self::PeriodSeconds,
        Self::Oracle,
        Self::SymbolBytes32,
        Self::ThresholdX8,
        Self::Chain,
        Self::ChainId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Token => "token",
            Self::TokenSym => "tokenSym",
            Self::Beneficiary => "beneficiary",
            Self::AmountUnits => "amountUnits",
            Self::PeriodSeconds => "periodSeconds",
            Self::Oracle => "oracle",
            Self::SymbolBytes32 => "symbolBytes32",
            Self::ThresholdX8 => "thresholdX8",
            Self::Chain => "chain",
            Self::ChainId => "chainId",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Solidity literal for this plan field. A missing owner renders as `address(0)`.
    fn literal(self, plan: &Plan) -> String {
        match self {
            Self::Owner => plan
                .owner()
                .map_or_else(|| "address(0)".to_string(), |a| a.to_checksum(None)),
            Self::Token => plan.token_addr().to_checksum(None),
            Self::TokenSym => plan.token_sym().to_string(),
            Self::Beneficiary => plan.beneficiary().to_checksum(None),
            Self::AmountUnits => plan.amount_units().to_string(),
            Self::PeriodSeconds => plan.period_seconds().to_string(),
            Self::Oracle => plan.oracle().to_checksum(None),
            Self::SymbolBytes32 => plan.symbol_bytes32().to_string(),
            Self::ThresholdX8 => plan.threshold_x8().to_string(),
            Self::Chain => plan.chain().to_string(),
            Self::ChainId => plan.chain_id().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Placeholder),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0usize;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or(TemplateError::Unterminated { offset: offset + start })?;
            let name = after_open[..end].trim();
            let placeholder = Placeholder::from_name(name).ok_or_else(|| TemplateError::UnknownPlaceholder {
                name: name.to_string(),
                offset: offset + start,
            })?;
            segments.push(Segment::Slot(placeholder));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            rest = &rest[consumed..];
            offset += consumed;
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Ok(Self { segments })
    }

    /// The contract template shipped with the crate.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::parse(BUILTIN_SOURCE)
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    pub fn render(&self, plan: &Plan) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(placeholder) => out.push_str(&placeholder.literal(plan)),
            }
        }
        out
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec;
    use recurring_intent_types::{Address, PlanParts, U256};

    pub(crate) fn sample_plan() -> Plan {
        Plan::new(PlanParts {
            chain: "SEPOLIA".into(),
            chain_id: 11_155_111,
            token_sym: "PYUSD".into(),
            token_addr: Address::repeat_byte(0xca),
            token_decimals: 6,
            owner: None,
            beneficiary: Address::repeat_byte(0x11),
            amount_units: U256::from(10_000_000u64),
            period_seconds: 604_800,
            oracle: Address::with_last_byte(1),
            symbol_bytes32: codec::to_bytes32("ETH"),
            threshold_x8: U256::from(300_000_000_000u64),
        })
        .unwrap()
    }

    #[test]
    fn test_builtin_uses_every_plan_field() {
        let template = Template::builtin().unwrap();
        let used: Vec<Placeholder> = template
            .segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Slot(p) => Some(*p),
                Segment::Text(_) => None,
            })
            .collect();
        for placeholder in Placeholder::ALL {
            assert!(used.contains(&placeholder), "{} unused", placeholder.name());
        }
    }

    #[test]
    fn test_render_substitutes_literals() {
        let template = Template::parse("a={{ amountUnits }};o={{owner}};s={{symbolBytes32}}").unwrap();
        let out = template.render(&sample_plan());
        assert_eq!(
            out,
            format!("a=10000000;o=address(0);s=0x455448{}", "00".repeat(29))
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = Template::builtin().unwrap();
        let plan = sample_plan();
        let first = template.render(&plan);
        assert_eq!(first, template.render(&plan));
        assert!(!first.contains("{{"));
        assert!(first.contains("PLANNED_BENEFICIARY = 0x1111111111111111111111111111111111111111;"));
    }

    #[test]
    fn test_builtin_stops_once_price_exceeds_threshold() {
        let source = Template::builtin().unwrap().render(&sample_plan());
        assert!(source.contains("if (priceX8 > thresholdX8) revert ConditionMet(priceX8);"));
        assert!(!source.contains("priceX8 <= thresholdX8"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Template::parse("x {{nope}}"),
            Err(TemplateError::UnknownPlaceholder { ref name, offset: 2 }) if name == "nope"
        ));
        assert!(matches!(
            Template::parse("ok {{owner}} then {{token"),
            Err(TemplateError::Unterminated { offset: 18 })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.sol.tpl");
        fs::write(&path, "chain {{chainId}}").unwrap();
        let template = Template::from_file(&path).unwrap();
        assert_eq!(template.render(&sample_plan()), "chain 11155111");
    }
}
