//! The one sentence form the parser accepts.
//!
//! `Send <amount> <TOKEN> to <destination> every <frequency> until <SYMBOL> > <threshold>`
//!
//! Keywords are case-insensitive. Each capture slot has a token-shape pattern; a token that
//! fails its pattern is a grammar mismatch, and normalization only runs on shapes that
//! matched.

use std::{collections::BTreeMap, sync::LazyLock};

use recurring_intent_types::Schedule;
use regex::Regex;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d[\d,]*(?:\.\d+)?$").expect("number pattern"));
static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{2,10}$").expect("symbol pattern"));
static DESTINATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-]+$").expect("destination pattern"));
static FREQUENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("frequency pattern"));

pub const KW_SEND: &str = "send";
pub const KW_TO: &str = "to";
pub const KW_EVERY: &str = "every";
pub const KW_UNTIL: &str = "until";

pub const USAGE: &str =
    "Expected: Send <amount> <TOKEN> to <ensOrAddress> every <daily|weekly|monthly> until <SYMBOL> > <threshold>";
pub const EXAMPLE: &str = "Try: Send 10 PYUSD to alice.eth every weekly until ETH > 3000";
pub const NUMBER_HINT: &str = "Use digits only, e.g., 10 or 10.5";

/// A capture slot of the production, used to point at what failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Amount,
    Token,
    Destination,
    Frequency,
    ConditionSymbol,
    Threshold,
}

impl Slot {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Token => "token symbol",
            Self::Destination => "destination",
            Self::Frequency => "frequency",
            Self::ConditionSymbol => "condition symbol",
            Self::Threshold => "threshold",
        }
    }
}

/// Immutable grammar configuration, built once and handed to the parser.
#[derive(Clone, Debug)]
pub struct Grammar {
    aliases: BTreeMap<String, Schedule>,
    number: Regex,
    symbol: Regex,
    destination: Regex,
    frequency: Regex,
}

impl Grammar {
    pub fn standard() -> Self {
        let aliases = [
            ("day", Schedule::Daily),
            ("everyday", Schedule::Daily),
            ("daily", Schedule::Daily),
            ("week", Schedule::Weekly),
            ("weekly", Schedule::Weekly),
            ("friday", Schedule::Weekly),
            ("month", Schedule::Monthly),
            ("monthly", Schedule::Monthly),
        ]
        .into_iter()
        .map(|(word, schedule)| (word.to_string(), schedule))
        .collect();

        Self {
            aliases,
            number: NUMBER_RE.clone(),
            symbol: SYMBOL_RE.clone(),
            destination: DESTINATION_RE.clone(),
            frequency: FREQUENCY_RE.clone(),
        }
    }

    /// Add (or redirect) a frequency alias. The word is matched lower-cased.
    pub fn with_alias(mut self, word: &str, schedule: Schedule) -> Self {
        self.aliases.insert(word.to_ascii_lowercase(), schedule);
        self
    }

    /// Map a frequency word onto the closed schedule set: alias table first, then the
    /// canonical names themselves.
    pub fn schedule_for(&self, word: &str) -> Option<Schedule> {
        let key = word.to_ascii_lowercase();
        self.aliases
            .get(&key)
            .copied()
            .or_else(|| key.parse().ok())
    }

    pub fn shape(&self, slot: Slot) -> &Regex {
        match slot {
            Slot::Amount | Slot::Threshold => &self.number,
            Slot::Token | Slot::ConditionSymbol => &self.symbol,
            Slot::Destination => &self.destination,
            Slot::Frequency => &self.frequency,
        }
    }

    pub fn is_keyword(word: &str, keyword: &str) -> bool {
        word.eq_ignore_ascii_case(keyword)
    }

    /// Hint listing the valid schedules and every alias that maps onto them.
    pub fn schedule_hint(&self) -> String {
        let canonical: Vec<String> = Schedule::ALL
            .iter()
            .map(|schedule| format!("\"{schedule}\""))
            .collect();
        let aliases: Vec<String> = Schedule::ALL
            .iter()
            .map(|schedule| {
                let words: Vec<&str> = self
                    .aliases
                    .iter()
                    .filter(|(word, target)| *target == schedule && word.as_str() != schedule.as_str())
                    .map(|(word, _)| word.as_str())
                    .collect();
                format!("{} -> {}", words.join("/"), schedule)
            })
            .collect();
        format!(
            "Allowed: {}. Aliases: {}.",
            canonical.join(", "),
            aliases.join("; ")
        )
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::standard()
    }
}
