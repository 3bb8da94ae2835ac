//! Negation and repeat cleanup over a sentence's codes.
//!
//! "turn on the wifi, no don't turn on the wifi" scans as
//! `4.00001, -1, 4.00001`. A negation marker retracts the command that
//! follows it together with every earlier mention of that same command;
//! when what follows is new, it retracts the command right before it
//! instead ("turn on the wifi, no don't").

use crate::code::DetectedCode;

/// Remove negation markers and the commands they retract.
///
/// Codes already retracted are ignored by later markers, so a single pass
/// leaves no markers behind.
pub fn apply_negations(codes: Vec<DetectedCode>) -> Vec<DetectedCode> {
    let mut codes: Vec<Option<DetectedCode>> = codes.into_iter().map(Some).collect();

    for index in 0..codes.len() {
        if codes[index] != Some(DetectedCode::Negation) {
            continue;
        }
        codes[index] = None;

        match codes.get(index + 1).copied().flatten() {
            Some(next) if next.is_command() => {
                let mut retracted = false;
                for earlier in codes[..index].iter_mut() {
                    if *earlier == Some(next) {
                        *earlier = None;
                        retracted = true;
                    }
                }
                if retracted {
                    codes[index + 1] = None;
                } else {
                    retract_previous(&mut codes, index);
                }
            }
            Some(_) => {}
            None => retract_previous(&mut codes, index),
        }
    }

    codes.into_iter().flatten().collect()
}

fn retract_previous(codes: &mut [Option<DetectedCode>], index: usize) {
    let Some(previous) = index.checked_sub(1).and_then(|i| codes.get_mut(i)) else {
        return;
    };
    if previous.is_some_and(|code| code.is_command()) {
        *previous = None;
    }
}

/// Drop a command code when the next code is the same command, keeping the
/// last of each run. Warnings are never collapsed.
pub fn collapse_repeats(codes: &[DetectedCode]) -> Vec<DetectedCode> {
    codes
        .iter()
        .enumerate()
        .filter(|(index, code)| {
            let next = codes.get(index + 1).and_then(DetectedCode::command_id);
            code.command_id().is_none() || code.command_id() != next
        })
        .map(|(_, code)| *code)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const NEG: DetectedCode = DetectedCode::Negation;
    const IT: DetectedCode = DetectedCode::UnresolvedIt;

    fn cmd(id: u32, condition: usize) -> DetectedCode {
        DetectedCode::Command { id, condition }
    }

    #[test]
    fn negated_repeat_cancels_every_mention() {
        let codes = vec![cmd(4, 0), cmd(6, 0), cmd(4, 0), NEG, cmd(4, 0)];
        assert_eq!(apply_negations(codes), vec![cmd(6, 0)]);
    }

    #[test]
    fn negated_new_command_cancels_the_previous_one() {
        let codes = vec![cmd(4, 0), cmd(6, 0), NEG, cmd(11, 1)];
        assert_eq!(apply_negations(codes), vec![cmd(4, 0), cmd(11, 1)]);
    }

    #[test]
    fn trailing_negation_cancels_the_previous_one() {
        assert_eq!(apply_negations(vec![cmd(4, 0), cmd(6, 0), NEG]), vec![cmd(4, 0)]);
    }

    #[test]
    fn lone_negation_is_dropped() {
        assert_eq!(apply_negations(vec![NEG]), Vec::<DetectedCode>::new());
        assert_eq!(apply_negations(vec![NEG, NEG]), Vec::<DetectedCode>::new());
    }

    #[test]
    fn warnings_are_not_retracted() {
        assert_eq!(apply_negations(vec![IT, NEG]), vec![IT]);
        assert_eq!(apply_negations(vec![cmd(4, 0), NEG, IT]), vec![cmd(4, 0), IT]);
    }

    #[test]
    fn only_same_condition_counts_as_a_mention() {
        let codes = vec![cmd(4, 0), NEG, cmd(4, 1)];
        assert_eq!(apply_negations(codes), vec![cmd(4, 1)]);
    }

    #[test]
    fn collapse_keeps_last_of_each_run() {
        let codes = [cmd(4, 0), cmd(4, 1), cmd(6, 0), IT, IT, cmd(4, 0)];
        assert_eq!(collapse_repeats(&codes), vec![cmd(4, 1), cmd(6, 0), IT, IT, cmd(4, 0)]);
    }

    fn any_code() -> impl Strategy<Value = DetectedCode> {
        prop_oneof![
            Just(NEG),
            Just(IT),
            Just(DetectedCode::UnresolvedAnd),
            (1u32..4, 0usize..3).prop_map(|(id, condition)| cmd(id, condition)),
        ]
    }

    proptest! {
        #[test]
        fn negation_filter_is_idempotent(codes in prop::collection::vec(any_code(), 0..16)) {
            let once = apply_negations(codes);
            prop_assert!(!once.contains(&NEG));
            prop_assert_eq!(apply_negations(once.clone()), once);
        }

        #[test]
        fn collapse_is_idempotent(codes in prop::collection::vec(any_code(), 0..16)) {
            let once = collapse_repeats(&codes);
            prop_assert_eq!(collapse_repeats(&once), once);
        }
    }
}
