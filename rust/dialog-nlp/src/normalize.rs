//! Lexical normalization.
//!
//! Speech recognizers are inconsistent about contractions ("what is",
//! "whats", "what's") and compounds ("shutdown"). Before tagging, runs of
//! words are rewritten through a substitution table so the grammar only has
//! to list one spelling. The table also turns "that one" style references
//! into "that it" so the reference resolver handles them like any other
//! "it".
//!
//! Rules match whole words and are tried in table order at each position;
//! the first rule that matches wins and scanning continues after it.

/// Rewrites the word list produced by the tokenizer.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, words: Vec<String>) -> Vec<String>;
}

/// A phrase rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub from: Vec<String>,
    pub to: Vec<String>,
}

impl Substitution {
    pub fn new(from: &str, to: &str) -> Self {
        Substitution {
            from: from.split_whitespace().map(str::to_string).collect(),
            to: to.split_whitespace().map(str::to_string).collect(),
        }
    }

    fn matches_at(&self, words: &[String], position: usize) -> bool {
        !self.from.is_empty()
            && words
                .get(position..position + self.from.len())
                .is_some_and(|window| window == self.from.as_slice())
    }
}

/// An ordered list of [`Substitution`]s.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    rules: Vec<Substitution>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, from: &str, to: &str) -> Self {
        self.rules.push(Substitution::new(from, to));
        self
    }

    /// Default English table.
    pub fn english() -> Self {
        SubstitutionTable::new()
            .with("next one", "next it")
            .with("previous one", "previous it")
            .with("that one", "that it")
            .with("this one", "this it")
            .with("what is", "what's")
            .with("whats", "what's")
            .with("who is", "who's")
            .with("whos", "who's")
            .with("how is", "how's")
            .with("hows", "how's")
            .with("that is", "that's")
            .with("thats", "that's")
            .with("there is", "there's")
            .with("theres", "there's")
            .with("do not", "don't")
            .with("dont", "don't")
            .with("shutdown", "shut down")
    }

    pub fn rules(&self) -> &[Substitution] {
        &self.rules
    }
}

impl Normalizer for SubstitutionTable {
    fn normalize(&self, words: Vec<String>) -> Vec<String> {
        let mut normalized = Vec::with_capacity(words.len());
        let mut position = 0;
        while position < words.len() {
            match self.rules.iter().find(|rule| rule.matches_at(&words, position)) {
                Some(rule) => {
                    normalized.extend(rule.to.iter().cloned());
                    position += rule.from.len();
                }
                None => {
                    normalized.push(words[position].clone());
                    position += 1;
                }
            }
        }
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn normalize(text: &str) -> String {
        let words = text.split_whitespace().map(str::to_string).collect();
        SubstitutionTable::english().normalize(words).join(" ")
    }

    #[test]
    fn expands_and_contracts() {
        assert_eq!(normalize("what is the time"), "what's the time");
        assert_eq!(normalize("please dont shutdown"), "please don't shut down");
        assert_eq!(normalize("play the next one"), "play the next it");
    }

    #[test]
    fn matches_whole_words_only() {
        assert_eq!(normalize("whatsoever donttouch"), "whatsoever donttouch");
        assert_eq!(normalize("someone"), "someone");
    }

    #[test]
    fn rule_at_sentence_end_needs_every_word() {
        assert_eq!(normalize("tell me what"), "tell me what");
        assert_eq!(normalize("do"), "do");
    }
}
