//! Error types for each pipeline stage.

use std::path::PathBuf;

/// Which part of the sentence was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    EmptyInput,
    GrammarMismatch,
    InvalidAmount,
    InvalidThreshold,
    UnsupportedSchedule,
    InvalidBeneficiary,
}

/// Parse failure with a human-readable message and an optional hint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", hint_suffix(.hint))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            hint: None,
        }
    }

    pub(crate) fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!("\nHint: {h}")).unwrap_or_default()
}

/// Planner failures, in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("only \"send\" is supported, got \"{0}\"")]
    UnsupportedAction(String),
    #[error("token {symbol} is not allowlisted on {chain}")]
    TokenNotAllowlisted { symbol: String, chain: String },
    #[error("could not resolve beneficiary {name}: {reason}")]
    UnresolvedBeneficiary { name: String, reason: String },
    #[error("amount must be greater than zero in the token's smallest unit")]
    ZeroAmount,
    #[error("amount {amount} exceeds the safety cap")]
    AmountExceedsCap { amount: String },
    #[error("period of {period_seconds}s is below the minimum of {min_seconds}s")]
    PeriodTooShort { period_seconds: u64, min_seconds: u64 },
    #[error("threshold must be greater than zero")]
    InvalidThreshold,
    #[error("threshold {threshold} is too large")]
    ThresholdTooLarge { threshold: String },
}

impl ValidationError {
    pub fn hint(&self) -> Option<String> {
        let hint = match self {
            Self::TokenNotAllowlisted { .. } => "Check the chain registry for supported tokens.".into(),
            Self::UnresolvedBeneficiary { .. } => "Use a 0x-address or a name with a resolver record.".into(),
            Self::ZeroAmount => "The amount rounds down to zero at the token's precision.".into(),
            Self::PeriodTooShort { min_seconds, .. } => {
                format!("Choose a schedule that repeats at most once every {min_seconds} seconds.")
            }
            _ => return None,
        };
        Some(hint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("value {digits} does not fit in 256 bits")]
    Overflow { digits: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("chain {0} is not in the registry")]
    UnknownChain(String),
    #[error("token {symbol} on {chain} has {decimals} decimals (max 77)")]
    InvalidDecimals {
        chain: String,
        symbol: String,
        decimals: u8,
    },
    #[error("failed reading registry {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing registry JSON")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown placeholder `{name}` at byte {offset}")]
    UnknownPlaceholder { name: String, offset: usize },
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },
    #[error("failed reading template {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by a name-resolution backend.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ResolveError(#[from] pub anyhow::Error);

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to write artifact {path}")]
    Store {
        path: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to serialise manifest")]
    Manifest(#[from] serde_json::Error),
    #[error("failed to format manifest timestamp")]
    Timestamp(#[from] time::error::Format),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_includes_hint() {
        let err = ParseError::new(ParseErrorKind::InvalidAmount, "Amount must be greater than 0.")
            .with_hint("Use digits only, e.g., 10 or 10.5");
        assert_eq!(
            err.to_string(),
            "Amount must be greater than 0.\nHint: Use digits only, e.g., 10 or 10.5"
        );
        let bare = ParseError::new(ParseErrorKind::EmptyInput, "Empty input.");
        assert_eq!(bare.to_string(), "Empty input.");
    }

    #[test]
    fn test_period_hint_names_configured_minimum() {
        let err = ValidationError::PeriodTooShort {
            period_seconds: 86_400,
            min_seconds: 604_800,
        };
        assert_eq!(
            err.hint().as_deref(),
            Some("Choose a schedule that repeats at most once every 604800 seconds.")
        );
        assert_eq!(ValidationError::InvalidThreshold.hint(), None);
    }
}
