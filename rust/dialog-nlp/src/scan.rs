//! Sentence scanning.
//!
//! Walks the resolved sentence left to right. Every word that triggers a
//! command anchors a match for that command; commands sharing a trigger
//! word all run, in registry order. Markers left by earlier stages become
//! codes of their own: a negation word becomes [`DetectedCode::Negation`]
//! and unresolved references become warnings.
//!
//! With invalidation on, a detected command consumes its trigger and every
//! word its slots matched, so "turn on the wifi and turn on the bluetooth"
//! does not report the wifi twice. Commands still pending at the same
//! trigger run with the trigger word captured before it was consumed.

use dialog_grammar::CommandRegistry;

use crate::code::DetectedCode;
use crate::error::NlpError;
use crate::matcher::{MatcherConfig, match_command};
use crate::select::select_condition;
use crate::token::Word;

/// Detect every command in `sentence`, in the order their triggers appear.
pub fn scan(
    sentence: &mut [Word],
    registry: &CommandRegistry,
    config: &MatcherConfig,
    invalidate: bool,
) -> Result<Vec<DetectedCode>, NlpError> {
    let mut codes = Vec::new();

    for anchor in 0..sentence.len() {
        let trigger = match &sentence[anchor] {
            Word::UnresolvedIt => {
                codes.push(DetectedCode::UnresolvedIt);
                continue;
            }
            Word::UnresolvedAnd => {
                codes.push(DetectedCode::UnresolvedAnd);
                continue;
            }
            Word::Invalidated => continue,
            Word::Text(text) if *text == config.negation_word => {
                codes.push(DetectedCode::Negation);
                continue;
            }
            Word::Text(text) => text.clone(),
        };

        for command in registry.triggered_by(&trigger) {
            let outcomes = match_command(sentence, anchor, command, config)?;
            let Some(condition) = select_condition(command, &outcomes, &trigger)? else {
                continue;
            };
            let code = DetectedCode::command(command.id, condition)?;
            tracing::trace!(%code, trigger = %trigger, anchor, "command detected");
            codes.push(code);

            if invalidate {
                for position in std::iter::once(anchor).chain(outcomes[condition].positions()) {
                    if let Some(word) = sentence.get_mut(position) {
                        *word = Word::Invalidated;
                    }
                }
            }
        }
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_grammar::LoadMode;
    use dialog_grammar::assistant::assistant_registry;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn words(text: &str) -> Vec<Word> {
        text.split_whitespace().map(Word::text).collect()
    }

    fn scan_text(text: &str, invalidate: bool) -> Result<String, NlpError> {
        let registry = assistant_registry()?;
        let mut sentence = words(text);
        let codes = scan(&mut sentence, &registry, &MatcherConfig::default(), invalidate)?;
        Ok(crate::code::join_codes(&codes))
    }

    #[test]
    fn codes_follow_trigger_order() -> TestResult {
        assert_eq!(
            scan_text("turn on wifi turn on the bluetooth", true)?,
            "4.00001, 6.00001"
        );
        Ok(())
    }

    #[test]
    fn negation_and_warnings_become_codes() -> TestResult {
        let registry = assistant_registry()?;
        let mut sentence = vec![
            Word::UnresolvedAnd,
            Word::text("don't"),
            Word::UnresolvedIt,
        ];
        let codes = scan(&mut sentence, &registry, &MatcherConfig::default(), true)?;
        assert_eq!(
            codes,
            vec![
                DetectedCode::UnresolvedAnd,
                DetectedCode::Negation,
                DetectedCode::UnresolvedIt,
            ]
        );
        Ok(())
    }

    #[test]
    fn invalidation_consumes_matched_words() -> TestResult {
        let registry = assistant_registry()?;
        let mut sentence = words("turn the wifi on please");
        let codes = scan(&mut sentence, &registry, &MatcherConfig::default(), true)?;
        assert_eq!(codes, vec![DetectedCode::Command { id: 4, condition: 0 }]);
        assert_eq!(
            sentence,
            vec![
                Word::Invalidated,
                Word::text("the"),
                Word::Invalidated,
                Word::Invalidated,
                Word::text("please"),
            ]
        );
        Ok(())
    }

    #[test]
    fn without_invalidation_words_are_reused() -> TestResult {
        let registry =
            CommandRegistry::from_text("4||1||||||wifi\\40||1||||||wifi", LoadMode::Strict)?;
        let mut sentence = words("turn wifi on");
        let codes = scan(&mut sentence, &registry, &MatcherConfig::default(), false)?;
        assert_eq!(codes.len(), 2);
        assert_eq!(sentence, words("turn wifi on"));
        Ok(())
    }

    #[test]
    fn consumed_words_block_later_commands() -> TestResult {
        let registry =
            CommandRegistry::from_text("4||1||||||wifi\\40||1||||||wifi", LoadMode::Strict)?;
        let mut sentence = words("turn wifi on");
        let codes = scan(&mut sentence, &registry, &MatcherConfig::default(), true)?;
        assert_eq!(codes, vec![DetectedCode::Command { id: 4, condition: 0 }]);
        Ok(())
    }

    #[test]
    fn no_trigger_no_codes() -> TestResult {
        assert_eq!(scan_text("the weather is nice", true)?, "");
        Ok(())
    }
}
