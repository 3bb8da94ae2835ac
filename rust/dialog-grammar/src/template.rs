//! Command type templates.
//!
//! Most device commands share their trigger verbs: every toggle starts with
//! "turn", "switch" and friends, every question with "what" or "tell". A
//! command definition names one or more numeric type codes and the template
//! contributes its trigger words, plus for a few types a rewrite of the
//! command's conditions.
//!
//! | code | type | triggers | conditions |
//! |------|------|----------|------------|
//! | 0 | none | | |
//! | 1 | turn on/off | turn get switch put | each `c` becomes `c on`, `c off` |
//! | 2 | ask | what's what tell say how how's how're | |
//! | 3 | stop | stop end finish cease conclude terminate | |
//! | 4 | answer | answer reply respond acknowledge | |
//! | 5 | shut down | shut power | `down/off` appended |
//! | 6 | reboot | reboot restart | |
//! | 7 | repeat speech | what say come go repeat | |
//! | 8 | start | start begin initialize commence | |
//! | 9 | will go | will gonna going i'll | |

use std::fmt;

use crate::slot::{Condition, Slot};

/// A predefined trigger/slot template selected by a numeric type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    None,
    TurnOnOff,
    Ask,
    Stop,
    Answer,
    ShutDown,
    Reboot,
    RepeatSpeech,
    Start,
    WillGo,
}

impl CommandType {
    pub const ALL: [CommandType; 10] = [
        CommandType::None,
        CommandType::TurnOnOff,
        CommandType::Ask,
        CommandType::Stop,
        CommandType::Answer,
        CommandType::ShutDown,
        CommandType::Reboot,
        CommandType::RepeatSpeech,
        CommandType::Start,
        CommandType::WillGo,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub fn code(&self) -> u8 {
        match self {
            CommandType::None => 0,
            CommandType::TurnOnOff => 1,
            CommandType::Ask => 2,
            CommandType::Stop => 3,
            CommandType::Answer => 4,
            CommandType::ShutDown => 5,
            CommandType::Reboot => 6,
            CommandType::RepeatSpeech => 7,
            CommandType::Start => 8,
            CommandType::WillGo => 9,
        }
    }

    pub fn trigger_words(&self) -> &'static [&'static str] {
        match self {
            CommandType::None => &[],
            CommandType::TurnOnOff => &["turn", "get", "switch", "put"],
            CommandType::Ask => &["what's", "what", "tell", "say", "how", "how's", "how're"],
            CommandType::Stop => &["stop", "end", "finish", "cease", "conclude", "terminate"],
            CommandType::Answer => &["answer", "reply", "respond", "acknowledge"],
            CommandType::ShutDown => &["shut", "power"],
            CommandType::Reboot => &["reboot", "restart"],
            CommandType::RepeatSpeech => &["what", "say", "come", "go", "repeat"],
            CommandType::Start => &["start", "begin", "initialize", "commence"],
            CommandType::WillGo => &["will", "gonna", "going", "i'll"],
        }
    }

    /// Rewrite `conditions` for this template.
    pub fn expand(&self, conditions: Vec<Condition>) -> Vec<Condition> {
        match self {
            CommandType::TurnOnOff => conditions
                .iter()
                .flat_map(|condition| {
                    [
                        condition.with_slot(Slot::words(["on"])),
                        condition.with_slot(Slot::words(["off"])),
                    ]
                })
                .collect(),
            CommandType::ShutDown => conditions
                .iter()
                .map(|condition| condition.with_slot(Slot::words(["down", "off"])))
                .collect(),
            _ => conditions,
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandType::None => "none",
            CommandType::TurnOnOff => "turn on/off",
            CommandType::Ask => "ask",
            CommandType::Stop => "stop",
            CommandType::Answer => "answer",
            CommandType::ShutDown => "shut down",
            CommandType::Reboot => "reboot",
            CommandType::RepeatSpeech => "repeat speech",
            CommandType::Start => "start",
            CommandType::WillGo => "will go",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(conditions: &[Condition]) -> Vec<String> {
        conditions.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn codes_round_trip() {
        for ty in CommandType::ALL {
            assert_eq!(CommandType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(CommandType::from_code(10), None);
    }

    #[test]
    fn turn_on_off_splits_every_condition() {
        let expanded = CommandType::TurnOnOff.expand(vec![
            Condition::parse("airplane mode"),
            Condition::parse("flight/airplane"),
        ]);
        assert_eq!(
            render(&expanded),
            vec![
                "airplane mode on",
                "airplane mode off",
                "flight/airplane on",
                "flight/airplane off",
            ]
        );
    }

    #[test]
    fn shut_down_appends_down_or_off() {
        let expanded = CommandType::ShutDown.expand(vec![Condition::parse("device/phone")]);
        assert_eq!(render(&expanded), vec!["device/phone down/off"]);
    }

    #[test]
    fn other_types_leave_conditions_alone() {
        let conditions = vec![Condition::parse("time")];
        assert_eq!(CommandType::Ask.expand(conditions.clone()), conditions);
        assert!(CommandType::Ask.trigger_words().contains(&"what's"));
    }
}
