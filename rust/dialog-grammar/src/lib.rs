//! # Dialog Grammar
//!
//! The data side of the command detector: what commands exist, which words
//! trigger them, and which nearby words complete them.
//!
//! ```text
//! grammar text ──parse──▶ Command ──add_or_update──▶ CommandRegistry
//!                           │                             │
//!                      CommandType                  SharedRegistry
//!                      templates                   (read by detection)
//! ```
//!
//! The matching itself lives in `dialog-nlp`; this crate only defines and
//! stores the grammar.

pub mod assistant;
pub mod command;
pub mod definition;
pub mod error;
pub mod registry;
pub mod slot;
pub mod template;

pub use command::{
    Command, CommandBuilder, CommandId, GroupExclusion, NextAnchor, StepKey, TriggerAllowList,
    Tunables, Window,
};
pub use definition::parse_command;
pub use error::DefinitionError;
pub use registry::{CommandRegistry, LoadMode, LoadReport, SharedRegistry};
pub use slot::{Alternative, Condition, PositionConstraint, Slot};
pub use template::CommandType;
