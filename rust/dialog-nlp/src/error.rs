//! Error types for command detection.

use dialog_grammar::{CommandId, DefinitionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("anchor {anchor} is outside a sentence of {len} words")]
    AnchorOutOfRange { anchor: usize, len: usize },

    #[error("command {command} produced {found} condition outcomes for {expected} conditions")]
    ConditionCountMismatch {
        command: CommandId,
        expected: usize,
        found: usize,
    },

    #[error("condition index {condition} of command {command} cannot be encoded")]
    UnencodableCondition { command: CommandId, condition: usize },

    #[error("tagger returned {tags} tags for {words} words")]
    TagCountMismatch { words: usize, tags: usize },

    #[error("'{text}' is not a detected command code")]
    MalformedCode { text: String },

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}
