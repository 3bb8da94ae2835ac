//! Slots and conditions, the matchable structure of a command.
//!
//! A command is completed by one of its conditions. A condition is an
//! ordered list of slots, and each slot is searched for near the trigger
//! word at one step of the match:
//!
//! ```text
//! "turn off airplane mode"
//!   trigger: turn
//!   condition: [airplane] [mode] [off]
//!                 step 0   step 1  step 2
//! ```
//!
//! A slot accepts any of its alternatives. Literal words are compared
//! exactly, `AnyDigit` accepts an integer, and `Absent` lets the slot be
//! satisfied when nothing else in the window matched.

use std::collections::BTreeSet;
use std::fmt;

/// Text form of [`Alternative::AnyDigit`] in grammar definitions.
pub const ANY_DIGIT_MARKER: &str = ";1;";

/// Text form of [`Alternative::Absent`] in grammar definitions.
pub const ABSENT_MARKER: &str = ";0;";

/// One acceptable token for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Alternative {
    /// An exact word.
    Literal(String),
    /// Any word that parses as an integer.
    AnyDigit,
    /// Satisfied by the absence of every other alternative in the window.
    Absent,
}

impl Alternative {
    /// Parse one synonym from the grammar text format.
    pub fn parse(word: &str) -> Self {
        match word {
            ANY_DIGIT_MARKER => Alternative::AnyDigit,
            ABSENT_MARKER => Alternative::Absent,
            other => Alternative::Literal(other.to_string()),
        }
    }

    /// Whether `word` concretely satisfies this alternative.
    ///
    /// `Absent` never matches a word; it is only consulted once a window
    /// scan has failed.
    pub fn matches(&self, word: &str) -> bool {
        match self {
            Alternative::Literal(literal) => literal == word,
            Alternative::AnyDigit => word.parse::<i64>().is_ok(),
            Alternative::Absent => false,
        }
    }

    /// The word of a `Literal`; markers have none.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Alternative::Literal(word) => Some(word),
            _ => None,
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alternative::Literal(word) => write!(f, "{word}"),
            Alternative::AnyDigit => write!(f, "{ANY_DIGIT_MARKER}"),
            Alternative::Absent => write!(f, "{ABSENT_MARKER}"),
        }
    }
}

/// The steps at which a slot may be checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PositionConstraint {
    #[default]
    Any,
    Steps(BTreeSet<usize>),
}

impl PositionConstraint {
    /// Whether the slot is eligible at search step `step`.
    pub fn allows(&self, step: usize) -> bool {
        match self {
            PositionConstraint::Any => true,
            PositionConstraint::Steps(steps) => steps.contains(&step),
        }
    }
}

/// A constraint checked at one step of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Steps at which the slot may be found.
    pub positions: PositionConstraint,
    /// Synonyms, any one of which satisfies the slot.
    pub alternatives: Vec<Alternative>,
}

impl Slot {
    pub fn new(alternatives: Vec<Alternative>) -> Self {
        Slot {
            positions: PositionConstraint::Any,
            alternatives,
        }
    }

    /// A slot accepting any of the given literal words.
    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Slot::new(
            words
                .into_iter()
                .map(|word| Alternative::Literal(word.into()))
                .collect(),
        )
    }

    /// Parse a `/`-joined synonym group, e.g. `device/phone`.
    pub fn parse(group: &str) -> Self {
        Slot::new(
            group
                .split('/')
                .filter(|word| !word.is_empty())
                .map(Alternative::parse)
                .collect(),
        )
    }

    /// Restrict the slot to the given search steps.
    pub fn with_positions(mut self, steps: impl IntoIterator<Item = usize>) -> Self {
        self.positions = PositionConstraint::Steps(steps.into_iter().collect());
        self
    }

    /// True when the slot can be satisfied by non-occurrence.
    pub fn is_optional(&self) -> bool {
        self.alternatives.contains(&Alternative::Absent)
    }

    /// The first alternative `word` satisfies.
    pub fn first_match(&self, word: &str) -> Option<&Alternative> {
        self.alternatives.iter().find(|alt| alt.matches(word))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alt) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{alt}")?;
        }
        Ok(())
    }
}

/// One complete alternative way a command's slots can be satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    /// In declaration order; the matcher may find them in any order.
    pub slots: Vec<Slot>,
}

impl Condition {
    pub fn new(slots: Vec<Slot>) -> Self {
        Condition { slots }
    }

    /// Parse a space-joined list of synonym groups, e.g. `airplane mode`.
    pub fn parse(groups: &str) -> Self {
        Condition::new(groups.split_whitespace().map(Slot::parse).collect())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether any slot can be satisfied by absence.
    pub fn has_optional(&self) -> bool {
        self.slots.iter().any(Slot::is_optional)
    }

    /// Number of slots that must be matched by a concrete word.
    pub fn required_len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_optional()).count()
    }

    /// A copy with `slot` appended.
    pub fn with_slot(&self, slot: Slot) -> Self {
        let mut slots = self.slots.clone();
        slots.push(slot);
        Condition { slots }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_synonym_group_with_markers() {
        let slot = Slot::parse("device/;1;/;0;");
        assert_eq!(
            slot.alternatives,
            vec![
                Alternative::Literal("device".into()),
                Alternative::AnyDigit,
                Alternative::Absent,
            ]
        );
        assert!(slot.is_optional());
    }

    #[test]
    fn digit_alternative_accepts_integers_only() {
        assert!(Alternative::AnyDigit.matches("42"));
        assert!(Alternative::AnyDigit.matches("-3"));
        assert!(!Alternative::AnyDigit.matches("four"));
        assert!(!Alternative::AnyDigit.matches("4.5"));
    }

    #[test]
    fn absent_never_matches_a_word() {
        assert!(!Alternative::Absent.matches(""));
        assert!(!Alternative::Absent.matches(";0;"));
    }

    #[test]
    fn condition_display_round_trips_text_form() {
        let condition = Condition::parse("device/phone safe mode");
        assert_eq!(condition.len(), 3);
        assert_eq!(condition.to_string(), "device/phone safe mode");
    }

    #[test]
    fn position_constraint_limits_steps() {
        let slot = Slot::words(["on"]).with_positions([1, 3]);
        assert!(!slot.positions.allows(0));
        assert!(slot.positions.allows(1));
        assert!(slot.positions.allows(3));
        assert!(PositionConstraint::Any.allows(17));
    }

    #[test]
    fn required_len_skips_optional_slots() {
        let condition = Condition::parse("recording audio/;0;");
        assert_eq!(condition.required_len(), 1);
        assert!(condition.has_optional());
    }
}
