//! # Dialog NLP
//!
//! Detects device commands in a transcribed spoken sentence and reports
//! them as packed numeric codes, one per command, in the order they were
//! spoken. Commands come from a [`dialog_grammar`] registry.
//!
//! ## Pipeline
//!
//! ```text
//! text -> tokenize -> normalize -> tag -> resolve "it"/"and" (carry in)
//!   -> scan: match + select per trigger word, consume matched words
//!     -> negation filter -> [collapse repeats] -> codes + carry out
//! ```
//!
//! ```
//! use dialog_grammar::assistant::assistant_registry;
//! use dialog_nlp::Detector;
//!
//! let detector = Detector::new(assistant_registry()?);
//! let result = detector.detect_to_string("turn on the wifi and the bluetooth", false, true, "");
//! assert_eq!(result, "bluetooth|turn on the|\\\\//4.00001, 6.00001");
//! # Ok::<(), dialog_grammar::DefinitionError>(())
//! ```
//!
//! Every stage is a plain function over owned data, so each can be tested
//! and reused on its own; [`Detector`] only wires them up.

pub mod code;
pub mod context;
pub mod detect;
pub mod error;
pub mod input;
pub mod matcher;
pub mod negation;
pub mod normalize;
pub mod resolve;
pub mod scan;
pub mod select;
pub mod tag;
pub mod token;

pub use code::{DetectedCode, join_codes};
pub use context::{CarryOver, Phrase};
pub use detect::{Detection, Detector, ERROR_MARKER, RESULT_SEPARATOR};
pub use error::NlpError;
pub use input::{DetectOptions, Input};
pub use matcher::MatcherConfig;
pub use normalize::{Normalizer, SubstitutionTable};
pub use tag::{LexiconTagger, PosTag, Tagger};
