//! Choosing the condition that completes a command.
//!
//! Several conditions may succeed at one trigger. Only those whose
//! allow-list accepts the trigger word are candidates, and among them the
//! longest condition wins: "reboot the phone in safe mode" should not be
//! reported as a plain reboot just because "phone" alone also matched.
//! Ties go to the condition declared first.

use dialog_grammar::Command;

use crate::error::NlpError;
use crate::matcher::ConditionOutcome;

/// Index of the best condition, or `None` when no condition qualifies.
pub fn select_condition(
    command: &Command,
    outcomes: &[ConditionOutcome],
    trigger: &str,
) -> Result<Option<usize>, NlpError> {
    if outcomes.len() != command.conditions.len() {
        return Err(NlpError::ConditionCountMismatch {
            command: command.id,
            expected: command.conditions.len(),
            found: outcomes.len(),
        });
    }

    let mut best: Option<(usize, usize)> = None;
    for (index, outcome) in outcomes.iter().enumerate() {
        if !outcome.succeeded() || !command.accepts_trigger(index, trigger) {
            continue;
        }
        let slots = outcome.slots.len();
        if best.is_none_or(|(_, best_slots)| slots > best_slots) {
            best = Some((index, slots));
        }
    }
    Ok(best.map(|(index, _)| index))
}
