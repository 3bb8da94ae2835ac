//! The command registry.
//!
//! Commands are loaded by an administrative step and then only read by
//! detection calls. [`CommandRegistry`] is the plain owned collection;
//! [`SharedRegistry`] puts it behind a reader/writer lock so many detection
//! calls can read it at once while reloads are serialized.
//!
//! Registry order is the order in which the scanner tries commands at a
//! trigger word, so replacing a command keeps its original slot.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::command::{Command, CommandId};
use crate::definition::{parse_command, split_specs};
use crate::error::DefinitionError;

/// How to treat invalid specs while loading a grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Drop the spec and log a warning.
    #[default]
    Lenient,
    /// Fail on the first invalid spec; nothing is applied.
    Strict,
}

/// Outcome of loading a grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<DefinitionError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from grammar text.
    pub fn from_text(grammar: &str, mode: LoadMode) -> Result<Self, DefinitionError> {
        let mut registry = CommandRegistry::new();
        registry.extend_from_text(grammar, mode)?;
        Ok(registry)
    }

    /// Insert `command`, replacing any command with the same id in place.
    /// Returns the replaced command.
    pub fn add_or_update(&mut self, command: Command) -> Option<Command> {
        match self.commands.iter_mut().find(|c| c.id == command.id) {
            Some(existing) => Some(std::mem::replace(existing, command)),
            None => {
                self.commands.push(command);
                None
            }
        }
    }

    pub fn remove(&mut self, id: CommandId) -> Option<Command> {
        let index = self.commands.iter().position(|c| c.id == id)?;
        Some(self.commands.remove(index))
    }

    pub fn get(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Every command, in scan order.
    pub fn all(&self) -> &[Command] {
        &self.commands
    }

    /// Commands that `word` triggers, in scan order.
    pub fn triggered_by<'a>(&'a self, word: &'a str) -> impl Iterator<Item = &'a Command> + 'a {
        self.commands.iter().filter(move |c| c.is_triggered_by(word))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Add or update every command in `grammar`.
    ///
    /// In strict mode the registry is left untouched when any spec is
    /// invalid.
    pub fn extend_from_text(
        &mut self,
        grammar: &str,
        mode: LoadMode,
    ) -> Result<LoadReport, DefinitionError> {
        let (commands, skipped) = parse_grammar(grammar, mode)?;
        let report = LoadReport {
            loaded: commands.len(),
            skipped,
        };
        for command in commands {
            self.add_or_update(command);
        }
        Ok(report)
    }

    /// Replace the whole registry with `grammar`.
    pub fn reload(&mut self, grammar: &str, mode: LoadMode) -> Result<LoadReport, DefinitionError> {
        let mut fresh = CommandRegistry::new();
        let report = fresh.extend_from_text(grammar, mode)?;
        *self = fresh;
        Ok(report)
    }
}

fn parse_grammar(
    grammar: &str,
    mode: LoadMode,
) -> Result<(Vec<Command>, Vec<DefinitionError>), DefinitionError> {
    let mut commands = Vec::new();
    let mut skipped = Vec::new();
    for spec in split_specs(grammar) {
        match parse_command(spec) {
            Ok(command) => commands.push(command),
            Err(error) if mode == LoadMode::Lenient => {
                tracing::warn!(%error, spec, "dropping invalid command spec");
                skipped.push(error);
            }
            Err(error) => return Err(error),
        }
    }
    tracing::debug!(loaded = commands.len(), skipped = skipped.len(), "parsed grammar");
    Ok((commands, skipped))
}

/// A registry shared between concurrent detection calls.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry(Arc<RwLock<CommandRegistry>>);

impl SharedRegistry {
    pub fn new(registry: CommandRegistry) -> Self {
        SharedRegistry(Arc::new(RwLock::new(registry)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, CommandRegistry> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, CommandRegistry> {
        self.0.write()
    }

    /// Parse `grammar` without holding the lock, then swap it in.
    pub fn reload(&self, grammar: &str, mode: LoadMode) -> Result<LoadReport, DefinitionError> {
        let mut fresh = CommandRegistry::new();
        let report = fresh.extend_from_text(grammar, mode)?;
        *self.0.write() = fresh;
        Ok(report)
    }
}

impl From<CommandRegistry> for SharedRegistry {
    fn from(registry: CommandRegistry) -> Self {
        SharedRegistry::new(registry)
    }
}
