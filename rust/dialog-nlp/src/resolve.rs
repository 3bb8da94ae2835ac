//! Pronoun and conjunction resolution.
//!
//! Spoken commands lean on "it" and "and" far more than the grammar can
//! express. Before scanning, both are rewritten from antecedents tracked
//! left to right over the tagged sentence:
//!
//! ```text
//! turn on the wifi and the bluetooth    "and" -> "turn on the"
//! shut down the phone then reboot it    "it"  -> "phone"
//! ```
//!
//! The noun antecedent is the most recent contiguous run of noun-tagged
//! words. One intervening non-noun arms a reset, so the *next* noun starts a
//! fresh phrase while the old one stays available until then.
//!
//! The action antecedent starts at each verb (together with the adjectives
//! right before it, as in "fast reboot") and grows with every following
//! non-noun word until the next verb or until it has been used for an
//! "and".
//!
//! An "and" followed within two words by a verb introduces a new action and
//! is simply dropped. Repeated "it"/"and" are dropped too, so stutters do
//! not push the object out of the matcher's search window.
//!
//! State is built per call from the caller's [`CarryOver`] and never shared.

use crate::context::{CarryOver, Phrase};
use crate::tag::PosTag;
use crate::token::Word;

/// A word with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub word: String,
    pub tag: PosTag,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: PosTag) -> Self {
        TaggedWord {
            word: word.into(),
            tag,
        }
    }
}

/// The rewritten sentence and the antecedents left at its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub words: Vec<Word>,
    pub carry: CarryOver,
}

#[derive(Debug, Default)]
struct NounTracker {
    phrase: Phrase,
    reset_armed: bool,
}

impl NounTracker {
    fn observe(&mut self, token: &TaggedWord) {
        if token.tag.is_noun() {
            if self.reset_armed {
                self.phrase.clear();
            }
            self.reset_armed = false;
            self.phrase.push(token.word.as_str());
        } else if !self.phrase.is_empty() {
            self.reset_armed = true;
        }
    }
}

#[derive(Debug, Default)]
struct ActionTracker {
    phrase: Phrase,
    collecting: bool,
}

impl ActionTracker {
    fn observe(&mut self, sentence: &[TaggedWord], index: usize) {
        let Some(token) = sentence.get(index) else {
            return;
        };
        if token.tag.is_noun() {
            return;
        }
        if token.tag.is_verb() {
            self.phrase.clear();
            self.collecting = true;
            let adjectives = sentence[..index]
                .iter()
                .rev()
                .take_while(|t| t.tag.is_adjective())
                .collect::<Vec<_>>();
            for adjective in adjectives.into_iter().rev() {
                self.phrase.push(adjective.word.as_str());
            }
            self.phrase.push(token.word.as_str());
        } else if self.collecting {
            self.phrase.push(token.word.as_str());
        }
    }

    fn stop(&mut self) {
        self.collecting = false;
    }
}

/// Per-call antecedent state.
#[derive(Debug, Default)]
pub struct ResolverState {
    noun: NounTracker,
    action: ActionTracker,
}

impl ResolverState {
    /// Seed the antecedents from the previous turn.
    pub fn new(carry: &CarryOver) -> Self {
        ResolverState {
            noun: NounTracker {
                phrase: carry.noun.clone(),
                reset_armed: false,
            },
            action: ActionTracker {
                phrase: carry.action.clone(),
                collecting: false,
            },
        }
    }

    pub fn resolve(mut self, sentence: &[TaggedWord]) -> Resolution {
        let mut words = Vec::with_capacity(sentence.len());

        for (index, token) in sentence.iter().enumerate() {
            let previous = index
                .checked_sub(1)
                .and_then(|p| sentence.get(p))
                .map(|t| t.word.as_str());

            match token.word.as_str() {
                "it" => {
                    if previous == Some("it") {
                        continue;
                    }
                    substitute(&mut words, &self.noun.phrase, Word::UnresolvedIt);
                }
                "and" => {
                    self.noun.observe(token);
                    let verb_ahead = (1..=2)
                        .filter_map(|offset| sentence.get(index + offset))
                        .any(|t| t.tag.is_verb());
                    if previous == Some("and") || verb_ahead {
                        continue;
                    }
                    substitute(&mut words, &self.action.phrase, Word::UnresolvedAnd);
                    self.action.stop();
                }
                word => {
                    self.noun.observe(token);
                    self.action.observe(sentence, index);
                    words.push(Word::text(word));
                }
            }
        }

        Resolution {
            words,
            carry: CarryOver::new(self.noun.phrase, self.action.phrase),
        }
    }
}

fn substitute(words: &mut Vec<Word>, antecedent: &Phrase, unresolved: Word) {
    if antecedent.is_empty() {
        words.push(unresolved);
    } else {
        words.extend(antecedent.words().iter().map(Word::text));
    }
}

/// Resolve "it" and "and" in `sentence`, starting from `carry`.
pub fn resolve(sentence: &[TaggedWord], carry: &CarryOver) -> Resolution {
    ResolverState::new(carry).resolve(sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{LexiconTagger, Tagger};
    use crate::token::render;
    use pretty_assertions::assert_eq;

    fn tagged(text: &str) -> Vec<TaggedWord> {
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let tags = LexiconTagger::english().tag(&words);
        words
            .into_iter()
            .zip(tags)
            .map(|(word, tag)| TaggedWord::new(word, tag))
            .collect()
    }

    fn run(text: &str, carry: &str) -> (String, String) {
        let resolution = resolve(&tagged(text), &CarryOver::from(carry));
        (render(&resolution.words), resolution.carry.to_string())
    }

    #[test]
    fn it_resolves_to_last_noun_phrase() {
        assert_eq!(
            run("shut down the phone and then reboot it", ""),
            (
                "shut down the phone then reboot phone".to_string(),
                "phone|reboot|".to_string()
            )
        );
    }

    #[test]
    fn and_repeats_the_action() {
        assert_eq!(
            run("turn on wifi and the bluetooth", ""),
            (
                "turn on wifi turn on the bluetooth".to_string(),
                "bluetooth|turn on|".to_string()
            )
        );
    }

    #[test]
    fn repeated_and_collapses() {
        let (words, _) = run("turn wifi on and and the airplane mode and the flashlight", "");
        assert_eq!(
            words,
            "turn wifi on turn on the airplane mode turn on the flashlight"
        );
    }

    #[test]
    fn repeated_it_collapses() {
        let (words, _) = run("turn on the wifi now turn it it off", "");
        assert_eq!(words, "turn on the wifi now turn wifi off");
    }

    #[test]
    fn unresolved_markers_without_antecedents() {
        let resolution = resolve(&tagged("and it"), &CarryOver::default());
        assert_eq!(resolution.words, vec![Word::UnresolvedAnd, Word::UnresolvedIt]);
    }

    #[test]
    fn carry_over_seeds_antecedents() {
        assert_eq!(
            run("and now turn it off", "wifi|turn on the"),
            ("now turn wifi off".to_string(), "wifi|turn off|".to_string())
        );
        assert_eq!(
            run("and the airplane mode too", "wifi|turn the on"),
            (
                "turn the on the airplane mode too".to_string(),
                "airplane mode|turn the on|".to_string()
            )
        );
    }

    #[test]
    fn leading_adjectives_join_the_action() {
        let (_, carry) = run("fast reboot the phone", "");
        assert_eq!(carry, "phone|fast reboot the|");
    }

    #[test]
    fn noun_phrase_survives_until_next_noun() {
        let (words, carry) = run("the video stop it and then play it again", "");
        assert_eq!(words, "the video stop video then play video again");
        assert_eq!(carry, "video|play again|");
    }
}
