//! The grammar text format.
//!
//! A grammar is a list of command specs joined by `\`. Each spec has five
//! fields joined by `||`:
//!
//! ```text
//! id || types || triggers || allow-lists || slot groups
//! 14 || 6     || fast     || fast|;4; -fast || reboot/restart device/phone|device/phone
//! ```
//!
//! - `types`: `+`-joined [`CommandType`] codes; empty means none.
//! - `triggers`: space-joined trigger words added to the template's.
//! - `allow-lists`: one `|`-separated list per condition; `-word` denies a
//!   trigger word and `;4;` accepts any. Empty means a single wildcard.
//! - `slot groups`: one `|`-separated condition each, space-joined slots,
//!   `/`-joined synonyms. `;1;` matches any integer and `;0;` marks the slot
//!   optional.
//!
//! Anything after the fifth field is ignored.

use crate::command::{Command, CommandBuilder, TriggerAllowList};
use crate::error::DefinitionError;
use crate::slot::Condition;
use crate::template::CommandType;

pub const SPEC_SEPARATOR: char = '\\';
pub const FIELD_SEPARATOR: &str = "||";

/// Split a grammar into its non-blank command specs.
pub fn split_specs(grammar: &str) -> impl Iterator<Item = &str> {
    grammar
        .split(SPEC_SEPARATOR)
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
}

/// Parse one command spec.
pub fn parse_command(spec: &str) -> Result<Command, DefinitionError> {
    let fields: Vec<&str> = spec.split(FIELD_SEPARATOR).map(str::trim).collect();
    let [id, types, triggers, allow_lists, slot_groups, ..] = fields[..] else {
        return Err(DefinitionError::MissingFields {
            spec: spec.to_string(),
            found: fields.len(),
        });
    };

    let id = parse_id(id)?;

    let types = types
        .split('+')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            code.parse::<u8>()
                .ok()
                .and_then(CommandType::from_code)
                .ok_or_else(|| DefinitionError::UnknownType {
                    id,
                    code: code.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut conditions: Vec<Condition> = if slot_groups.is_empty() {
        Vec::new()
    } else {
        slot_groups.split('|').map(Condition::parse).collect()
    };

    let allow_lists: Vec<TriggerAllowList> = if allow_lists.is_empty() {
        vec![TriggerAllowList::any()]
    } else {
        let lists: Vec<_> = allow_lists.split('|').map(TriggerAllowList::parse).collect();
        if let Some(last) = conditions.last().cloned() {
            while conditions.len() < lists.len() {
                conditions.push(last.clone());
            }
        }
        lists
    };

    let mut builder = CommandBuilder::new(id).triggers(triggers.split_whitespace());
    for ty in &types {
        builder = builder.triggers(ty.trigger_words().iter().copied());
        conditions = ty.expand(conditions);
    }
    for condition in conditions {
        builder = builder.condition(condition);
    }
    for list in allow_lists {
        builder = builder.allow_list(list);
    }
    builder.build()
}

fn parse_id(text: &str) -> Result<u32, DefinitionError> {
    let id: i64 = text.parse().map_err(|_| DefinitionError::MalformedId {
        value: text.to_string(),
    })?;
    if id <= 0 {
        return Err(DefinitionError::ReservedId { id });
    }
    u32::try_from(id).map_err(|_| DefinitionError::MalformedId {
        value: text.to_string(),
    })
}
