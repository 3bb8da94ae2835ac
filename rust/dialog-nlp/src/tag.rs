//! Part-of-speech tagging.
//!
//! The reference resolver only needs coarse word classes, read off Penn
//! Treebank tags by prefix: `N…` nouns, `VB…` verbs and `J…` adjectives.
//! Any tagger can be plugged in through [`Tagger`]; [`LexiconTagger`] is a
//! deterministic lookup tuned for short device commands, where a general
//! purpose tagger tends to read "turn", "record" or "reboot" as nouns.

use std::collections::HashMap;
use std::fmt;

/// A Penn Treebank tag such as `NN`, `VBP` or `JJ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PosTag(String);

impl PosTag {
    pub fn new(tag: impl Into<String>) -> Self {
        PosTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_noun(&self) -> bool {
        self.0.starts_with('N')
    }

    pub fn is_verb(&self) -> bool {
        self.0.starts_with("VB")
    }

    pub fn is_adjective(&self) -> bool {
        self.0.starts_with('J')
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assigns one tag per word.
pub trait Tagger: Send + Sync {
    /// Must return exactly one tag per word.
    fn tag(&self, words: &[String]) -> Vec<PosTag>;
}

/// A word-to-tag lookup with suffix and digit fallbacks.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, PosTag>,
}

const COMMAND_VERBS: &[&str] = &[
    "turn", "get", "switch", "put", "record", "reboot", "restart", "shut", "start", "begin",
    "initialize", "commence", "stop", "finish", "cease", "conclude", "terminate", "answer",
    "reply", "respond", "acknowledge", "end", "play", "pause", "resume", "continue", "take",
    "make", "tell", "say", "repeat", "set", "open", "close", "enable", "disable", "activate",
    "deactivate", "confirm", "reject", "approve", "disapprove", "certify",
];

const CLOSED_CLASSES: &[(&str, &[&str])] = &[
    ("VBP", &["do", "don't"]),
    ("VBG", &["going"]),
    ("MD", &["will", "i'll", "can", "could", "would", "should"]),
    ("DT", &["the", "a", "an", "this", "that", "these", "those", "all", "some"]),
    ("PRP$", &["my", "your", "our"]),
    ("PRP", &["i", "me", "you", "we", "us", "they", "them"]),
    ("RP", &["on", "off", "down", "up", "out"]),
    ("IN", &["of", "in", "to", "at", "for", "with", "from", "into", "about"]),
    ("CC", &["and", "or", "but"]),
    ("UH", &["no", "yes", "ok", "okay", "hey", "oh"]),
    ("RB", &["please", "again", "then", "also", "now", "too", "not", "just", "right"]),
    ("JJ", &["fast", "next", "previous", "frontal", "safe"]),
    ("WP", &["what", "what's", "who", "who's"]),
    ("WRB", &["how", "how's", "how're", "when", "where"]),
    ("NN", &["it", "mode", "bluetooth"]),
];

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexicon for English device commands.
    pub fn english() -> Self {
        let mut tagger = LexiconTagger::new();
        for verb in COMMAND_VERBS {
            tagger = tagger.with_entry(*verb, "VB");
        }
        for (tag, words) in CLOSED_CLASSES {
            for word in *words {
                tagger = tagger.with_entry(*word, *tag);
            }
        }
        tagger
    }

    pub fn with_entry(mut self, word: impl Into<String>, tag: impl Into<String>) -> Self {
        self.entries.insert(word.into(), PosTag::new(tag));
        self
    }

    fn tag_word(&self, word: &str) -> PosTag {
        if let Some(tag) = self.entries.get(word) {
            return tag.clone();
        }
        if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
            PosTag::new("CD")
        } else if word.len() > 3 && word.ends_with("ly") {
            PosTag::new("RB")
        } else {
            PosTag::new("NN")
        }
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, words: &[String]) -> Vec<PosTag> {
        words.iter().map(|word| self.tag_word(word)).collect()
    }
}
