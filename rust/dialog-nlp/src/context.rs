//! Carry-over context between conversational turns.
//!
//! A turn ends with two antecedents: the last noun phrase ("it") and the
//! last action phrase ("and"). The caller keeps them as an opaque string and
//! hands it back with the next sentence:
//!
//! ```text
//! "turn on the wifi"  ->  carry "wifi|turn on the|"
//! "turn it off" + carry "wifi|turn on the|"  ->  "turn wifi off"
//! ```

use std::fmt;
use std::str::FromStr;

/// An ordered run of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phrase(Vec<String>);

impl Phrase {
    pub fn push(&mut self, word: impl Into<String>) {
        self.0.push(word.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Phrase {
    fn from(text: &str) -> Self {
        Phrase(text.split_whitespace().map(str::to_string).collect())
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Antecedents handed from one detection call to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarryOver {
    pub noun: Phrase,
    pub action: Phrase,
}

impl CarryOver {
    pub fn new(noun: Phrase, action: Phrase) -> Self {
        CarryOver { noun, action }
    }

    pub fn is_empty(&self) -> bool {
        self.noun.is_empty() && self.action.is_empty()
    }
}

/// Parses `noun|action|`; missing parts are empty and extra parts ignored.
impl FromStr for CarryOver {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.split('|');
        let noun = parts.next().map(Phrase::from).unwrap_or_default();
        let action = parts.next().map(Phrase::from).unwrap_or_default();
        Ok(CarryOver { noun, action })
    }
}

impl From<&str> for CarryOver {
    fn from(text: &str) -> Self {
        let Ok(carry) = text.parse::<CarryOver>();
        carry
    }
}

impl fmt::Display for CarryOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|", self.noun, self.action)
    }
}
