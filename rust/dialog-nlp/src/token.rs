//! Tokenization and the sentence word type.
//!
//! Raw text is split on whitespace and lowercased; punctuation hugging a
//! word ("wifi," or "off?") is trimmed off, while apostrophes and hyphens
//! inside a word ("don't", "wi-fi") are kept.
//!
//! Once references are resolved the sentence is a list of [`Word`]s. Besides
//! ordinary text a word can be one of the markers the pipeline writes into
//! the sentence: an unresolved "it" or "and", or a position a detected
//! command has already consumed. Markers never match a slot.

use std::fmt;

/// A word as heard, before any rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased form used everywhere downstream.
    pub word: String,
    /// As the recognizer wrote it, minus surrounding punctuation.
    pub spoken: String,
}

pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .filter(|spoken| !spoken.is_empty())
        .map(|spoken| Token {
            word: spoken.to_lowercase(),
            spoken: spoken.to_string(),
        })
        .collect()
}

/// One position of a resolved sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Word {
    Text(String),
    /// Consumed by a detected command.
    Invalidated,
    /// An "it" with no antecedent.
    UnresolvedIt,
    /// An "and" with no action to repeat.
    UnresolvedAnd,
}

impl Word {
    pub fn text(word: impl Into<String>) -> Self {
        Word::Text(word.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Word::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Remove hyphens from a text word ("wi-fi" becomes "wifi").
    pub fn without_hyphens(self) -> Self {
        match self {
            Word::Text(text) if text.contains('-') => Word::Text(text.replace('-', "")),
            other => other,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Text(text) => write!(f, "{text}"),
            Word::Invalidated => write!(f, "<consumed>"),
            Word::UnresolvedIt => write!(f, "<it?>"),
            Word::UnresolvedAnd => write!(f, "<and?>"),
        }
    }
}

/// Render a sentence for logs.
pub fn render(words: &[Word]) -> String {
    words
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.word).collect()
    }

    #[test]
    fn lowercases_but_keeps_the_spoken_form() {
        let tokens = tokenize("Turn on the WiFi");
        assert_eq!(words("Turn on the WiFi"), vec!["turn", "on", "the", "wifi"]);
        assert_eq!(tokens[3].spoken, "WiFi");
    }

    #[test]
    fn trims_surrounding_punctuation() {
        assert_eq!(
            words("no, don't turn it off! ... ok?"),
            vec!["no", "don't", "turn", "it", "off", "ok"]
        );
    }

    #[test]
    fn keeps_inner_apostrophes_and_hyphens() {
        assert_eq!(words("Don't touch the Wi-Fi"), vec!["don't", "touch", "the", "wi-fi"]);
    }

    #[test]
    fn hyphens_removed_from_text_only() {
        assert_eq!(Word::text("wi-fi").without_hyphens(), Word::text("wifi"));
        assert_eq!(Word::Invalidated.without_hyphens(), Word::Invalidated);
    }
}
