//! The slot matching engine.
//!
//! Given a sentence, the position of a trigger word and one command, the
//! matcher looks for each condition's slots in small windows around a
//! cursor that starts at the trigger and follows the words it finds.
//! All conditions advance in lockstep, one step per slot:
//!
//! ```text
//! sentence:  turn  off  airplane  mode  on
//!            ^anchor
//! step 0     window 1..=3   "off"      (condition "airplane mode off")
//! step 1     window 2..=4   "airplane" cursor moved to "off"
//! step 2     window 3..=5   "mode"
//! ```
//!
//! At every step each window position is checked against every slot that
//! is eligible at that step, so slots may be found in any order. After a
//! find:
//!
//! - the words of an exclusive group ("on"/"off") that were *not* found are
//!   struck from every condition, so "on" cannot satisfy the "on" condition
//!   once "off" has been heard;
//! - the found slot's alternatives are struck from the condition, so the same
//!   synonym group is not consumed twice;
//! - the cursor moves to the found word (or per the command's anchor rule).
//!
//! A condition fails as soon as one step finds nothing, or when one of the
//! command's own trigger words sits between two finds: "set, set two alarms"
//! is the command repeated, not one long match.

use dialog_grammar::{Command, Slot, Window};

use crate::error::NlpError;
use crate::token::Word;

/// Knobs shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Groups of words that exclude each other once one is found.
    pub exclusive_groups: Vec<Vec<String>>,
    /// Window used where a command does not override it.
    pub default_window: Window,
    /// Word the scanner reports as a negation marker.
    pub negation_word: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        let group = |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };
        MatcherConfig {
            exclusive_groups: vec![
                group(&["on", "off"]),
                group(&["stop", "continue", "play", "resume", "next", "previous"]),
            ],
            default_window: Window::DEFAULT,
            negation_word: "don't".to_string(),
        }
    }
}

impl MatcherConfig {
    /// Replace the exclusive word groups.
    pub fn with_exclusive_groups<G, W>(mut self, groups: G) -> Self
    where
        G: IntoIterator<Item = W>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        self.exclusive_groups = groups
            .into_iter()
            .map(|group| group.into_iter().map(Into::into).collect())
            .collect();
        self
    }

    pub fn with_default_window(mut self, window: Window) -> Self {
        self.default_window = window;
        self
    }

    pub fn with_negation_word(mut self, word: impl Into<String>) -> Self {
        self.negation_word = word.into();
        self
    }

    fn rivals_of<'a>(&'a self, word: &str) -> Option<&'a [String]> {
        self.exclusive_groups
            .iter()
            .find(|group| group.iter().any(|member| member == word))
            .map(Vec::as_slice)
    }
}

/// The result of one slot search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotMatch {
    pub matched: bool,
    /// `None` when the slot was missing or satisfied by absence.
    pub position: Option<usize>,
}

impl SlotMatch {
    pub const MISSING: SlotMatch = SlotMatch {
        matched: false,
        position: None,
    };

    pub const ABSENT: SlotMatch = SlotMatch {
        matched: true,
        position: None,
    };

    pub fn at(position: usize) -> Self {
        SlotMatch {
            matched: true,
            position: Some(position),
        }
    }
}

/// One record per slot, in the order the steps found them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    pub slots: Vec<SlotMatch>,
}

impl ConditionOutcome {
    pub fn succeeded(&self) -> bool {
        self.slots.iter().all(|slot| slot.matched)
    }

    /// Sentence positions of concretely matched words.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().filter_map(|slot| slot.position)
    }
}

/// Per-condition search state; slots are a working copy that exclusions
/// shrink as the search goes.
#[derive(Debug)]
struct Search {
    slots: Vec<Slot>,
    cursor: usize,
    previous: usize,
    failed: bool,
    found: Vec<SlotMatch>,
}

impl Search {
    fn finish(mut self) -> ConditionOutcome {
        self.found.resize(self.slots.len(), SlotMatch::MISSING);
        ConditionOutcome { slots: self.found }
    }
}

enum Step {
    Word { position: usize, slot: usize },
    Absent { slot: usize },
    Nothing,
}

/// Match every condition of `command` around the trigger at `anchor`.
///
/// Returns one outcome per condition, in declaration order.
pub fn match_command(
    sentence: &[Word],
    anchor: usize,
    command: &Command,
    config: &MatcherConfig,
) -> Result<Vec<ConditionOutcome>, NlpError> {
    if anchor >= sentence.len() {
        return Err(NlpError::AnchorOutOfRange {
            anchor,
            len: sentence.len(),
        });
    }
    let tunables = &command.tunables;

    let mut searches: Vec<Search> = command
        .conditions
        .iter()
        .map(|condition| Search {
            slots: condition.slots.clone(),
            cursor: anchor,
            previous: anchor,
            failed: false,
            found: Vec::with_capacity(condition.len()),
        })
        .collect();

    if tunables.exclude_trigger_words {
        for slot in searches.iter_mut().flat_map(|s| s.slots.iter_mut()) {
            slot.alternatives
                .retain(|alt| !alt.as_literal().is_some_and(|w| command.is_triggered_by(w)));
        }
    }

    for step in 0..command.max_steps() {
        let window = tunables.window(step, config.default_window);

        for index in 0..searches.len() {
            let search = &searches[index];
            if search.failed || step >= search.slots.len() {
                continue;
            }

            match search_step(sentence, search, step, window) {
                Step::Word { position, slot } => {
                    if !tunables.ignore_trigger_repetition
                        && repeats_trigger(sentence, anchor, search.previous, position, command)
                    {
                        searches[index].failed = true;
                        continue;
                    }

                    if tunables.exclude_mutually_exclusive {
                        if let Some(word) = sentence.get(position).and_then(Word::as_text) {
                            exclude_rivals(&mut searches, word, config);
                        }
                    }

                    let search = &mut searches[index];
                    search.found.push(SlotMatch::at(position));
                    if tunables.exclude_matched_group.applies(step) {
                        strike_group(&mut search.slots, slot);
                    }
                    search.previous = position;
                    search.cursor = tunables.next_anchor(step + 1).resolve(position);
                }
                Step::Absent { slot } => {
                    let search = &mut searches[index];
                    search.found.push(SlotMatch::ABSENT);
                    if let Some(slot) = search.slots.get_mut(slot) {
                        slot.alternatives.clear();
                    }
                }
                Step::Nothing => searches[index].failed = true,
            }
        }
    }

    Ok(searches.into_iter().map(Search::finish).collect())
}

/// Scan the window around the cursor for any slot eligible at `step`.
fn search_step(sentence: &[Word], search: &Search, step: usize, window: Window) -> Step {
    let eligible: Vec<usize> = search
        .slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.positions.allows(step))
        .map(|(index, _)| index)
        .collect();
    if eligible.is_empty() {
        return Step::Nothing;
    }

    let Some(last) = sentence.len().checked_sub(1) else {
        return Step::Nothing;
    };
    let start = search.cursor.saturating_sub(window.left);
    let end = search.cursor.saturating_add(window.right).min(last);

    let mut searched = false;
    for position in (start..=end).filter(|&p| p != search.cursor) {
        searched = true;
        let Some(word) = sentence.get(position).and_then(Word::as_text) else {
            continue;
        };
        for &slot in &eligible {
            if search.slots[slot].first_match(word).is_some() {
                return Step::Word { position, slot };
            }
        }
    }

    if searched {
        if let Some(&slot) = eligible.iter().find(|&&slot| search.slots[slot].is_optional()) {
            return Step::Absent { slot };
        }
    }
    Step::Nothing
}

/// Whether one of the command's trigger words lies strictly between the
/// previous find and this one. The anchor itself does not count.
fn repeats_trigger(
    sentence: &[Word],
    anchor: usize,
    previous: usize,
    position: usize,
    command: &Command,
) -> bool {
    let (from, to) = (previous.min(position), previous.max(position));
    (from + 1..to)
        .filter(|&p| p != anchor)
        .filter_map(|p| sentence.get(p).and_then(Word::as_text))
        .any(|word| command.is_triggered_by(word))
}

fn exclude_rivals(searches: &mut [Search], word: &str, config: &MatcherConfig) {
    let Some(group) = config.rivals_of(word) else {
        return;
    };
    for slot in searches.iter_mut().flat_map(|s| s.slots.iter_mut()) {
        slot.alternatives.retain(|alt| {
            alt.as_literal()
                .is_none_or(|literal| literal == word || !group.iter().any(|g| g == literal))
        });
    }
}

fn strike_group(slots: &mut [Slot], matched: usize) {
    let Some(group) = slots.get(matched).map(|slot| slot.alternatives.clone()) else {
        return;
    };
    for slot in slots.iter_mut() {
        slot.alternatives.retain(|alt| !group.contains(alt));
    }
}
