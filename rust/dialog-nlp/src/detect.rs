//! The detection pipeline.
//!
//! [`Detector`] strings the stages together and is the crate's entry point.
//! It holds only shared, read-mostly state, so one detector can serve
//! concurrent calls while an administrator reloads the grammar through the
//! same [`SharedRegistry`].

use std::fmt;

use dialog_grammar::SharedRegistry;

use crate::code::{DetectedCode, join_codes};
use crate::context::CarryOver;
use crate::error::NlpError;
use crate::input::{DetectOptions, Input};
use crate::matcher::MatcherConfig;
use crate::negation::{apply_negations, collapse_repeats};
use crate::normalize::{Normalizer, SubstitutionTable};
use crate::resolve::{TaggedWord, resolve};
use crate::scan::scan;
use crate::tag::{LexiconTagger, Tagger};
use crate::token::{Word, render, tokenize};

/// Prefix of the string returned when detection fails internally.
pub const ERROR_MARKER: &str = "3234_ACD_ERR - ";

/// Separates the carry-over from the codes in the string result.
pub const RESULT_SEPARATOR: &str = "\\\\//";

/// The outcome of one detection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Detected commands and warnings, in sentence order.
    pub codes: Vec<DetectedCode>,
    /// Context to hand to the next call.
    pub carry: CarryOver,
    /// The sentence as the scanner left it.
    pub words: Vec<Word>,
}

/// Renders as `carry\\//codes`, the device's wire form.
impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RESULT_SEPARATOR}{}", self.carry, join_codes(&self.codes))
    }
}

pub struct Detector {
    registry: SharedRegistry,
    normalizer: Box<dyn Normalizer>,
    tagger: Box<dyn Tagger>,
    config: MatcherConfig,
}

impl Detector {
    /// A detector for English with the default matcher settings.
    pub fn new(registry: impl Into<SharedRegistry>) -> Self {
        Detector {
            registry: registry.into(),
            normalizer: Box::new(SubstitutionTable::english()),
            tagger: Box::new(LexiconTagger::english()),
            config: MatcherConfig::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    pub fn with_tagger(mut self, tagger: impl Tagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn detect(&self, input: &Input) -> Result<Detection, NlpError> {
        let tokens = tokenize(&input.text);
        tracing::debug!(
            heard = %tokens.iter().map(|t| t.spoken.as_str()).collect::<Vec<_>>().join(" "),
            "tokenized"
        );
        let words: Vec<String> = tokens.into_iter().map(|token| token.word).collect();
        let words = self.normalizer.normalize(words);
        tracing::debug!(words = %words.join(" "), "normalized");

        let tags = self.tagger.tag(&words);
        if tags.len() != words.len() {
            return Err(NlpError::TagCountMismatch {
                words: words.len(),
                tags: tags.len(),
            });
        }
        let tagged: Vec<TaggedWord> = words
            .into_iter()
            .zip(tags)
            .map(|(word, tag)| TaggedWord::new(word, tag))
            .collect();

        let resolution = resolve(&tagged, &input.carry);
        let mut sentence: Vec<Word> = resolution
            .words
            .into_iter()
            .map(Word::without_hyphens)
            .collect();
        tracing::debug!(sentence = %render(&sentence), carry = %resolution.carry, "resolved");

        let DetectOptions {
            collapse_repeats: collapse,
            invalidate_consumed,
        } = input.options;

        let codes = {
            let registry = self.registry.read();
            scan(&mut sentence, &registry, &self.config, invalidate_consumed)?
        };
        tracing::debug!(codes = %join_codes(&codes), "scanned");

        let mut codes = apply_negations(codes);
        if collapse {
            codes = collapse_repeats(&codes);
        }

        Ok(Detection {
            codes,
            carry: resolution.carry,
            words: sentence,
        })
    }

    /// String form of [`Detector::detect`] for callers across a text
    /// boundary.
    ///
    /// Returns `""` for a blank sentence and [`ERROR_MARKER`] followed by the
    /// message when detection fails.
    pub fn detect_to_string(
        &self,
        sentence: &str,
        collapse: bool,
        invalidate: bool,
        carry: &str,
    ) -> String {
        if sentence.trim().is_empty() {
            return String::new();
        }
        let input = Input::new(sentence).with_carry(carry).with_options(
            DetectOptions::default()
                .collapse_repeats(collapse)
                .invalidate_consumed(invalidate),
        );
        match self.detect(&input) {
            Ok(detection) => detection.to_string(),
            Err(error) => {
                tracing::warn!(%error, sentence, "detection failed");
                format!("{ERROR_MARKER}{error}")
            }
        }
    }
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
