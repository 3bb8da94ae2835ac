//! The built-in device assistant grammar.
//!
//! Command ids are part of the wire contract with the device side: the
//! detector reports `id.condition` codes and the device maps them back to
//! actions, so ids here never change meaning.

use crate::definition::SPEC_SEPARATOR;
use crate::error::DefinitionError;
use crate::registry::{CommandRegistry, LoadMode};

pub const FLASHLIGHT: u32 = 1;
pub const TIME: u32 = 2;
pub const DATE: u32 = 3;
pub const WIFI: u32 = 4;
pub const MOBILE_DATA: u32 = 5;
pub const BLUETOOTH: u32 = 6;
pub const ANSWER_CALL: u32 = 7;
pub const END_CALL: u32 = 9;
pub const SPEAKERS: u32 = 10;
pub const AIRPLANE_MODE: u32 = 11;
pub const BATTERY: u32 = 12;
pub const POWER_OFF: u32 = 13;
pub const REBOOT: u32 = 14;
pub const TAKE_PHOTO: u32 = 15;
pub const RECORD_MEDIA: u32 = 16;
pub const SAY_AGAIN: u32 = 17;
pub const MAKE_CALL: u32 = 18;
pub const POWER_SAVER: u32 = 19;
pub const STOP_RECORDING: u32 = 20;
pub const MEDIA_CONTROL: u32 = 21;
pub const CONFIRM: u32 = 22;
pub const REJECT: u32 = 23;
pub const STOP_LISTENING: u32 = 24;
pub const START_LISTENING: u32 = 25;
pub const WEATHER: u32 = 26;
pub const NEWS: u32 = 27;
pub const GONNA_SLEEP: u32 = 28;
pub const IMAGE_HELP: u32 = 32;

/// One spec per command, in scan order.
pub const ASSISTANT_SPECS: &[&str] = &[
    "1||1||||||flashlight/lantern",
    "2||2||||||time",
    "3||2||||||date/day/month/year",
    "4||1||||||wifi",
    "5||1||||||mobile data",
    "6||1||||||bluetooth",
    "7||4||||||call",
    "9||3||||||call",
    "10||1||||||speaker/speakers",
    "11||1||||||airplane mode",
    "12||2||||||battery percentage/status/level/levels",
    "13||5||||||device/phone",
    "14||6||fast||fast|;4; -fast||reboot/restart device/phone|device/phone|device/phone recovery|device/phone safe mode|device/phone bootloader",
    "15||0||take||||picture/photo|frontal picture/photo",
    "16||8||record||record|record|;4; -record||audio/sound|video/camera|recording audio/sound|recording video/camera",
    "17||7||||||again",
    "18||0||make place||||call",
    "19||1||||||power/battery saver",
    "20||3||||||recording audio/sound|recording video/camera",
    "21||0||play continue resume pause stop next previous||play continue resume|pause|stop|next|previous||media/song/songs/music/audio/musics/video/videos",
    "22||0||i||||do/confirm/approve/certify",
    "23||0||i||||don't/reject/disapprove",
    "24||3||||||listening",
    "25||8||||||listening",
    "26||2||||||weather",
    "27||2||||||news",
    "28||9||||||sleep",
    "32||0||help||||this image/picture|image/picture clipboard/copied",
];

/// The assistant grammar in the `\`-joined text format.
pub fn assistant_grammar() -> String {
    ASSISTANT_SPECS.join(&SPEC_SEPARATOR.to_string())
}

/// A registry holding the assistant grammar.
pub fn assistant_registry() -> Result<CommandRegistry, DefinitionError> {
    CommandRegistry::from_text(&assistant_grammar(), LoadMode::Strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn every_spec_loads() -> TestResult {
        let registry = assistant_registry()?;
        assert_eq!(registry.len(), ASSISTANT_SPECS.len());
        Ok(())
    }

    #[test]
    fn reboot_has_five_conditions_with_fast_only_first() -> TestResult {
        let registry = assistant_registry()?;
        let reboot = registry.get(REBOOT).ok_or("reboot missing")?;
        assert_eq!(reboot.conditions.len(), 5);
        assert!(reboot.accepts_trigger(0, "fast"));
        assert!(!reboot.accepts_trigger(1, "fast"));
        assert!(reboot.accepts_trigger(4, "reboot"));
        Ok(())
    }

    #[test]
    fn media_control_conditions_follow_allow_lists() -> TestResult {
        let registry = assistant_registry()?;
        let media = registry.get(MEDIA_CONTROL).ok_or("media control missing")?;
        assert_eq!(media.conditions.len(), 5);
        assert!(media.accepts_trigger(0, "resume"));
        assert!(media.accepts_trigger(2, "stop"));
        assert!(!media.accepts_trigger(2, "play"));
        assert!(media.accepts_trigger(3, "next"));
        Ok(())
    }

    #[test]
    fn power_off_requires_down_or_off() -> TestResult {
        let registry = assistant_registry()?;
        let power = registry.get(POWER_OFF).ok_or("power off missing")?;
        assert_eq!(power.conditions[0].to_string(), "device/phone down/off");
        Ok(())
    }
}
