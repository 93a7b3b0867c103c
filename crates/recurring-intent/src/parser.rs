//! Sentence → [`Intent`].
//!
//! A single production over the lexer's tokens:
//!
//! ```text
//! SEND amount token TO destination EVERY frequency UNTIL symbol ">" threshold EOF
//! ```
//!
//! Every accepted sentence has exactly one reading. Shape failures name the slot and byte
//! offset that failed; value checks (positivity, schedule, destination) run afterwards on
//! the captured text.

use std::sync::LazyLock;

use recurring_intent_types::{Decimal, Destination, Intent, Schedule};
use tracing::debug;

use crate::{
    errors::{ParseError, ParseErrorKind},
    grammar::{self, Grammar, Slot},
    lexer::{tokenize, Token, TokenKind},
};

static STANDARD: LazyLock<Parser> = LazyLock::new(|| Parser::new(Grammar::standard()));

/// Parse with the standard grammar.
pub fn parse(text: &str) -> Result<Intent, ParseError> {
    STANDARD.parse(text)
}

#[derive(Clone, Debug)]
pub struct Parser {
    grammar: Grammar,
}

impl Parser {
    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }

    pub fn parse(&self, text: &str) -> Result<Intent, ParseError> {
        if text.trim().is_empty() {
            return Err(
                ParseError::new(ParseErrorKind::EmptyInput, "Empty input.").with_hint(grammar::EXAMPLE)
            );
        }

        let tokens = tokenize(text);
        let mut cursor = Cursor {
            grammar: &self.grammar,
            tokens: &tokens,
            pos: 0,
        };

        cursor.keyword(grammar::KW_SEND)?;
        let amount_raw = cursor.capture(Slot::Amount)?;
        let token_raw = cursor.capture(Slot::Token)?;
        cursor.keyword(grammar::KW_TO)?;
        let to_raw = cursor.capture(Slot::Destination)?;
        cursor.keyword(grammar::KW_EVERY)?;
        let frequency_raw = cursor.capture(Slot::Frequency)?;
        cursor.keyword(grammar::KW_UNTIL)?;
        let symbol_raw = cursor.capture(Slot::ConditionSymbol)?;
        cursor.comparator()?;
        let threshold_raw = cursor.capture(Slot::Threshold)?;
        cursor.finish()?;

        let amount = normalize_number(amount_raw, ParseErrorKind::InvalidAmount)?;
        if amount.is_zero() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAmount,
                "Amount must be greater than 0.",
            ));
        }
        let schedule = self.normalize_schedule(frequency_raw)?;
        let to = normalize_destination(to_raw)?;
        let threshold = normalize_number(threshold_raw, ParseErrorKind::InvalidThreshold)?;
        if threshold.is_zero() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidThreshold,
                "Threshold must be greater than 0.",
            ));
        }

        let intent = Intent::send(token_raw, amount, to, schedule, symbol_raw, threshold)
            .map_err(|err| {
                ParseError::new(ParseErrorKind::GrammarMismatch, format!("Could not parse: {err}."))
            })?;
        debug!(
            asset = %intent.asset(),
            schedule = %intent.schedule(),
            name_destination = intent.to().is_name(),
            "parsed intent"
        );
        Ok(intent)
    }

    fn normalize_schedule(&self, word: &str) -> Result<Schedule, ParseError> {
        self.grammar.schedule_for(word).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnsupportedSchedule,
                format!("Unsupported schedule \"{word}\"."),
            )
            .with_hint(self.grammar.schedule_hint())
        })
    }
}

/// Strip thousands separators and read an exact decimal.
fn normalize_number(raw: &str, kind: ParseErrorKind) -> Result<Decimal, ParseError> {
    let cleaned = raw.replace(',', "");
    cleaned.parse::<Decimal>().map_err(|_| {
        ParseError::new(kind, format!("Invalid number format \"{raw}\".")).with_hint(grammar::NUMBER_HINT)
    })
}

fn normalize_destination(raw: &str) -> Result<Destination, ParseError> {
    let trimmed = raw.trim();
    Destination::classify(trimmed).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidBeneficiary,
            format!("Invalid beneficiary \"{trimmed}\"."),
        )
        .with_hint("Use a 0x-address or ENS name ending with .eth (e.g., alice.eth)")
    })
}

struct Cursor<'g, 't, 'a> {
    grammar: &'g Grammar,
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'a> Cursor<'_, '_, 'a> {
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::Word && Grammar::is_keyword(token.text, keyword) => Ok(()),
            other => Err(mismatch(&format!("keyword \"{keyword}\""), other)),
        }
    }

    fn capture(&mut self, slot: Slot) -> Result<&'a str, ParseError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::Word && self.grammar.shape(slot).is_match(token.text) => {
                Ok(token.text)
            }
            other => Err(mismatch(slot.describe(), other)),
        }
    }

    fn comparator(&mut self) -> Result<(), ParseError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::Gt => Ok(()),
            other => Err(mismatch("\">\"", other)),
        }
    }

    fn finish(&mut self) -> Result<(), ParseError> {
        match self.next() {
            None => Ok(()),
            Some(token) => Err(ParseError::new(
                ParseErrorKind::GrammarMismatch,
                format!(
                    "Could not parse: unexpected trailing input \"{}\" at position {}.",
                    token.text, token.offset
                ),
            )
            .with_hint(grammar::USAGE)),
        }
    }
}

fn mismatch(expected: &str, found: Option<Token<'_>>) -> ParseError {
    let message = match found {
        Some(token) => format!(
            "Could not parse: expected {expected} at position {}, found \"{}\".",
            token.offset, token.text
        ),
        None => format!("Could not parse: expected {expected}, found end of input."),
    };
    ParseError::new(ParseErrorKind::GrammarMismatch, message).with_hint(grammar::USAGE)
}
