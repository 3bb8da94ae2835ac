//! Error types for grammar definitions.

use thiserror::Error;

/// Why a command definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("command spec has {found} fields, expected at least 5: '{spec}'")]
    MissingFields { spec: String, found: usize },

    #[error("command id '{value}' is not an integer")]
    MalformedId { value: String },

    #[error("command id {id} is reserved; ids must be positive")]
    ReservedId { id: i64 },

    #[error("unknown command type code '{code}' in command {id}")]
    UnknownType { id: u32, code: String },

    #[error("command {id} has no conditions")]
    NoConditions { id: u32 },

    #[error("condition {condition} of command {id} has no slots")]
    EmptyCondition { id: u32, condition: usize },

    #[error("slot {slot} of condition {condition} in command {id} has no alternatives")]
    EmptySlot { id: u32, condition: usize, slot: usize },

    #[error("command {id} has no trigger words")]
    NoTriggerWords { id: u32 },

    #[error("command {id} has {count} conditions; at most {max} can be encoded")]
    TooManyConditions { id: u32, count: usize, max: usize },
}
