//! Commands: one recognizable intent each.
//!
//! A command's schema is plain data: the trigger words that make the
//! scanner try it, the conditions that can complete it, which trigger words
//! each condition accepts, and a handful of tunables that shape the slot
//! search. Commands are usually built from the grammar text format (see
//! [`crate::definition`]) but can be assembled directly:
//!
//! ```
//! use dialog_grammar::{CommandBuilder, Condition};
//!
//! let wifi = CommandBuilder::new(4)
//!     .triggers(["turn", "switch"])
//!     .condition(Condition::parse("wifi on"))
//!     .condition(Condition::parse("wifi off"))
//!     .build()
//!     .unwrap();
//! assert_eq!(wifi.conditions.len(), 2);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::error::DefinitionError;
use crate::slot::Condition;

/// Stable positive identifier of a command.
pub type CommandId = u32;

/// Text form of the "accept any trigger word" allow-list entry.
pub const WILDCARD_MARKER: &str = ";4;";

/// Largest number of conditions a command may declare.
///
/// The condition index is packed into five decimal digits of the detected
/// code, so `condition_index + 1` must stay below 100000.
pub const MAX_CONDITIONS: usize = 99_999;

/// A recognizable intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Reported as the integer part of the detected code.
    pub id: CommandId,
    /// Words that start a match for this command.
    pub trigger_words: BTreeSet<String>,
    /// Alternatives in declaration order; earlier wins ties.
    pub conditions: Vec<Condition>,
    /// One list per condition. A condition past the end uses the last list.
    pub trigger_allow_lists: Vec<TriggerAllowList>,
    pub tunables: Tunables,
}

impl Command {
    /// Whether `word` is one of the command's trigger words.
    pub fn is_triggered_by(&self, word: &str) -> bool {
        self.trigger_words.contains(word)
    }

    /// The allow-list governing `condition`.
    ///
    /// Returns `None` only for a command with no allow-lists at all, which
    /// accepts every trigger word.
    pub fn allow_list_for(&self, condition: usize) -> Option<&TriggerAllowList> {
        self.trigger_allow_lists
            .get(condition)
            .or_else(|| self.trigger_allow_lists.last())
    }

    /// Whether `condition` may complete a match started by `trigger`.
    pub fn accepts_trigger(&self, condition: usize, trigger: &str) -> bool {
        self.allow_list_for(condition)
            .is_none_or(|list| list.accepts(trigger))
    }

    /// Longest slot count over all conditions.
    pub fn max_steps(&self) -> usize {
        self.conditions.iter().map(Condition::len).max().unwrap_or(0)
    }

    /// Check the structural rules every registered command must satisfy.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let id = self.id;
        if id == 0 {
            return Err(DefinitionError::ReservedId { id: 0 });
        }
        if self.trigger_words.is_empty() {
            return Err(DefinitionError::NoTriggerWords { id });
        }
        if self.conditions.is_empty() {
            return Err(DefinitionError::NoConditions { id });
        }
        if self.conditions.len() > MAX_CONDITIONS {
            return Err(DefinitionError::TooManyConditions {
                id,
                count: self.conditions.len(),
                max: MAX_CONDITIONS,
            });
        }
        for (condition, slots) in self.conditions.iter().enumerate() {
            if slots.is_empty() {
                return Err(DefinitionError::EmptyCondition { id, condition });
            }
            if let Some(slot) = slots.slots.iter().position(|s| s.alternatives.is_empty()) {
                return Err(DefinitionError::EmptySlot {
                    id,
                    condition,
                    slot,
                });
            }
        }

        if !self.is_resolution_ordered() {
            tracing::debug!(
                command = id,
                "conditions are not ordered optional-first, longest-first; \
                 ties may resolve to an unexpected condition"
            );
        }
        Ok(())
    }

    /// Whether conditions with optional slots precede those without, and
    /// longer conditions precede shorter ones within each group.
    fn is_resolution_ordered(&self) -> bool {
        self.conditions.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            match (a.has_optional(), b.has_optional()) {
                (false, true) => false,
                (true, false) => true,
                _ => a.required_len() >= b.required_len(),
            }
        })
    }
}

/// Which trigger words may have started a condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerAllowList {
    /// Accept every trigger word not denied.
    pub any: bool,
    /// Trigger words accepted when `any` is unset.
    pub allowed: BTreeSet<String>,
    /// Honored even when `any` is set.
    pub denied: BTreeSet<String>,
}

impl TriggerAllowList {
    /// The wildcard list.
    pub fn any() -> Self {
        TriggerAllowList {
            any: true,
            ..Default::default()
        }
    }

    /// Accept exactly `words`.
    pub fn only<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TriggerAllowList {
            any: false,
            allowed: words.into_iter().map(Into::into).collect(),
            denied: BTreeSet::new(),
        }
    }

    pub fn deny(mut self, word: impl Into<String>) -> Self {
        self.denied.insert(word.into());
        self
    }

    /// Parse a space-joined list: words, `-word` denials and the wildcard.
    pub fn parse(text: &str) -> Self {
        let mut list = TriggerAllowList::default();
        for word in text.split_whitespace() {
            if word == WILDCARD_MARKER {
                list.any = true;
            } else if let Some(denied) = word.strip_prefix('-') {
                list.denied.insert(denied.to_string());
            } else {
                list.allowed.insert(word.to_string());
            }
        }
        list
    }

    /// Denials win over both the wildcard and the allowed words.
    pub fn accepts(&self, trigger: &str) -> bool {
        !self.denied.contains(trigger) && (self.any || self.allowed.contains(trigger))
    }
}

/// Key of a per-step override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StepKey {
    Step(usize),
    Even,
    Odd,
    All,
}

impl StepKey {
    fn parity(step: usize) -> Self {
        if step % 2 == 0 { StepKey::Even } else { StepKey::Odd }
    }
}

/// Search window around the cursor, in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Words searched before the cursor.
    pub left: usize,
    /// Words searched after the cursor.
    pub right: usize,
}

impl Window {
    pub const DEFAULT: Window = Window { left: 0, right: 3 };
}

impl Default for Window {
    fn default() -> Self {
        Window::DEFAULT
    }
}

/// Where the cursor goes after a slot is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAnchor {
    /// The position of the word just matched.
    WordFound,
    /// The position of the word just matched, shifted; clamped at zero.
    WordFoundOffset(isize),
    /// A fixed sentence position.
    Absolute(usize),
}

impl NextAnchor {
    pub fn resolve(&self, found: usize) -> usize {
        match *self {
            NextAnchor::WordFound => found,
            NextAnchor::WordFoundOffset(offset) => found.saturating_add_signed(offset),
            NextAnchor::Absolute(position) => position,
        }
    }
}

/// The steps after which a matched synonym group is struck from the
/// condition's remaining slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupExclusion {
    Never,
    #[default]
    Always,
    Steps(BTreeSet<usize>),
}

impl GroupExclusion {
    pub fn applies(&self, step: usize) -> bool {
        match self {
            GroupExclusion::Never => false,
            GroupExclusion::Always => true,
            GroupExclusion::Steps(steps) => steps.contains(&step),
        }
    }
}

/// Per-command knobs for the slot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tunables {
    /// Words searched before the cursor, per step.
    pub left_intervals: BTreeMap<StepKey, usize>,
    /// Words searched after the cursor, per step.
    pub right_intervals: BTreeMap<StepKey, usize>,
    /// Where the step being started places its cursor, keyed by that
    /// step. Step 0 always starts at the trigger, so `Step(0)` is never
    /// consulted.
    pub next_anchors: BTreeMap<StepKey, NextAnchor>,
    pub exclude_matched_group: GroupExclusion,
    /// Let a condition keep matching across a repeated trigger word.
    pub ignore_trigger_repetition: bool,
    /// Strike the command's own trigger words from every slot.
    pub exclude_trigger_words: bool,
    /// Apply the matcher's exclusive word groups ("on"/"off").
    pub exclude_mutually_exclusive: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Tunables {
            left_intervals: BTreeMap::new(),
            right_intervals: BTreeMap::new(),
            next_anchors: BTreeMap::new(),
            exclude_matched_group: GroupExclusion::Always,
            ignore_trigger_repetition: false,
            exclude_trigger_words: false,
            exclude_mutually_exclusive: true,
        }
    }
}

impl Tunables {
    /// Resolve the window for `step`: exact step, then parity, then all
    /// steps, then `default`. Left and right resolve independently.
    pub fn window(&self, step: usize, default: Window) -> Window {
        Window {
            left: interval_override(&self.left_intervals, step).unwrap_or(default.left),
            right: interval_override(&self.right_intervals, step).unwrap_or(default.right),
        }
    }

    /// Cursor rule for the step being started: exact step, then all
    /// steps, then the position of the last find.
    pub fn next_anchor(&self, step: usize) -> NextAnchor {
        self.next_anchors
            .get(&StepKey::Step(step))
            .or_else(|| self.next_anchors.get(&StepKey::All))
            .copied()
            .unwrap_or(NextAnchor::WordFound)
    }
}

fn interval_override(map: &BTreeMap<StepKey, usize>, step: usize) -> Option<usize> {
    map.get(&StepKey::Step(step))
        .or_else(|| map.get(&StepKey::parity(step)))
        .or_else(|| map.get(&StepKey::All))
        .copied()
}

/// Builder for constructing commands ergonomically.
pub struct CommandBuilder {
    id: CommandId,
    trigger_words: BTreeSet<String>,
    conditions: Vec<Condition>,
    trigger_allow_lists: Vec<TriggerAllowList>,
    tunables: Tunables,
}

impl CommandBuilder {
    pub fn new(id: CommandId) -> Self {
        CommandBuilder {
            id,
            trigger_words: BTreeSet::new(),
            conditions: Vec::new(),
            trigger_allow_lists: Vec::new(),
            tunables: Tunables::default(),
        }
    }

    pub fn trigger(mut self, word: impl Into<String>) -> Self {
        self.trigger_words.insert(word.into());
        self
    }

    pub fn triggers<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn allow_list(mut self, list: TriggerAllowList) -> Self {
        self.trigger_allow_lists.push(list);
        self
    }

    pub fn left_interval(mut self, key: StepKey, words: usize) -> Self {
        self.tunables.left_intervals.insert(key, words);
        self
    }

    pub fn right_interval(mut self, key: StepKey, words: usize) -> Self {
        self.tunables.right_intervals.insert(key, words);
        self
    }

    /// Place the cursor with `anchor` when the step named by `key` starts.
    pub fn next_anchor(mut self, key: StepKey, anchor: NextAnchor) -> Self {
        self.tunables.next_anchors.insert(key, anchor);
        self
    }

    pub fn exclude_matched_group(mut self, exclusion: GroupExclusion) -> Self {
        self.tunables.exclude_matched_group = exclusion;
        self
    }

    pub fn ignore_trigger_repetition(mut self, ignore: bool) -> Self {
        self.tunables.ignore_trigger_repetition = ignore;
        self
    }

    pub fn exclude_trigger_words(mut self, exclude: bool) -> Self {
        self.tunables.exclude_trigger_words = exclude;
        self
    }

    pub fn exclude_mutually_exclusive(mut self, exclude: bool) -> Self {
        self.tunables.exclude_mutually_exclusive = exclude;
        self
    }

    /// Finish the command. An empty allow-list set becomes a single
    /// wildcard list.
    pub fn build(mut self) -> Result<Command, DefinitionError> {
        if self.trigger_allow_lists.is_empty() {
            self.trigger_allow_lists.push(TriggerAllowList::any());
        }
        let command = Command {
            id: self.id,
            trigger_words: self.trigger_words,
            conditions: self.conditions,
            trigger_allow_lists: self.trigger_allow_lists,
            tunables: self.tunables,
        };
        command.validate()?;
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Slot;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn reboot() -> Result<Command, DefinitionError> {
        CommandBuilder::new(14)
            .triggers(["reboot", "restart", "fast"])
            .condition(Condition::parse("reboot/restart device/phone"))
            .condition(Condition::parse("device/phone"))
            .allow_list(TriggerAllowList::only(["fast"]))
            .allow_list(TriggerAllowList::any().deny("fast"))
            .build()
    }

    #[test]
    fn allow_list_past_the_end_uses_the_last() -> TestResult {
        let command = reboot()?;
        assert!(command.accepts_trigger(0, "fast"));
        assert!(!command.accepts_trigger(0, "reboot"));
        assert!(command.accepts_trigger(1, "reboot"));
        assert!(!command.accepts_trigger(1, "fast"));
        assert!(!command.accepts_trigger(7, "fast"));
        Ok(())
    }

    #[test]
    fn wildcard_with_denial_parses_from_text() {
        let list = TriggerAllowList::parse(";4; -record");
        assert!(list.any);
        assert!(list.accepts("start"));
        assert!(!list.accepts("record"));
    }

    #[test]
    fn window_resolution_order() {
        let tunables = Tunables {
            left_intervals: BTreeMap::from([(StepKey::Step(2), 5), (StepKey::Even, 2), (StepKey::All, 1)]),
            right_intervals: BTreeMap::from([(StepKey::Odd, 6)]),
            ..Default::default()
        };
        assert_eq!(tunables.window(2, Window::DEFAULT), Window { left: 5, right: 3 });
        assert_eq!(tunables.window(0, Window::DEFAULT), Window { left: 2, right: 3 });
        assert_eq!(tunables.window(1, Window::DEFAULT), Window { left: 1, right: 6 });
        assert_eq!(Tunables::default().window(9, Window::DEFAULT), Window::DEFAULT);
    }

    #[test]
    fn next_anchor_offsets_clamp_at_zero() {
        assert_eq!(NextAnchor::WordFoundOffset(-4).resolve(2), 0);
        assert_eq!(NextAnchor::WordFoundOffset(2).resolve(2), 4);
        assert_eq!(NextAnchor::Absolute(7).resolve(2), 7);

        let tunables = Tunables {
            next_anchors: BTreeMap::from([(StepKey::All, NextAnchor::Absolute(0))]),
            ..Default::default()
        };
        assert_eq!(tunables.next_anchor(3), NextAnchor::Absolute(0));
        assert_eq!(Tunables::default().next_anchor(3), NextAnchor::WordFound);
    }

    #[test]
    fn build_rejects_structural_errors() {
        let no_conditions = CommandBuilder::new(3).trigger("what").build();
        assert_eq!(no_conditions, Err(DefinitionError::NoConditions { id: 3 }));

        let empty_slot = CommandBuilder::new(3)
            .trigger("what")
            .condition(Condition::new(vec![Slot::new(vec![])]))
            .build();
        assert_eq!(
            empty_slot,
            Err(DefinitionError::EmptySlot { id: 3, condition: 0, slot: 0 })
        );

        let reserved = CommandBuilder::new(0)
            .trigger("what")
            .condition(Condition::parse("time"))
            .build();
        assert_eq!(reserved, Err(DefinitionError::ReservedId { id: 0 }));
    }
}
