//! Detected command codes.
//!
//! A detection is reported to the device as one number per command:
//! `id + (condition_index + 1) / 100000`, so `11.00002` is the second
//! condition of command 11. Codes are kept typed in memory and rendered as
//! exact decimals, so the text form always parses back to the same command
//! and condition. Negative numbers are reserved for control codes.

use std::fmt;
use std::str::FromStr;

use dialog_grammar::CommandId;
use dialog_grammar::command::MAX_CONDITIONS;

use crate::error::NlpError;

/// Denominator of the condition fraction.
pub const CONDITION_SCALE: u32 = 100_000;

const FRACTION_DIGITS: usize = 5;

/// One entry of a detection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedCode {
    Command { id: CommandId, condition: usize },
    /// A "don't" marker; consumed by the negation filter.
    Negation,
    /// The sentence used "it" with nothing to refer to.
    UnresolvedIt,
    /// The sentence used "and" with no action to repeat.
    UnresolvedAnd,
}

impl DetectedCode {
    pub const NEGATION: i32 = -1;
    pub const UNRESOLVED_IT: i32 = -10;
    pub const UNRESOLVED_AND: i32 = -11;

    pub fn command(id: CommandId, condition: usize) -> Result<Self, NlpError> {
        if id == 0 || condition >= MAX_CONDITIONS {
            return Err(NlpError::UnencodableCondition {
                command: id,
                condition,
            });
        }
        Ok(DetectedCode::Command { id, condition })
    }

    pub fn is_command(&self) -> bool {
        matches!(self, DetectedCode::Command { .. })
    }

    pub fn command_id(&self) -> Option<CommandId> {
        match self {
            DetectedCode::Command { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The packed numeric value.
    pub fn as_f64(&self) -> f64 {
        match *self {
            DetectedCode::Command { id, condition } => {
                f64::from(id) + (condition as f64 + 1.0) / f64::from(CONDITION_SCALE)
            }
            DetectedCode::Negation => f64::from(Self::NEGATION),
            DetectedCode::UnresolvedIt => f64::from(Self::UNRESOLVED_IT),
            DetectedCode::UnresolvedAnd => f64::from(Self::UNRESOLVED_AND),
        }
    }
}

impl fmt::Display for DetectedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DetectedCode::Command { id, condition } => {
                let fraction = format!("{:0width$}", condition + 1, width = FRACTION_DIGITS);
                write!(f, "{id}.{}", fraction.trim_end_matches('0'))
            }
            DetectedCode::Negation => write!(f, "{}", Self::NEGATION),
            DetectedCode::UnresolvedIt => write!(f, "{}", Self::UNRESOLVED_IT),
            DetectedCode::UnresolvedAnd => write!(f, "{}", Self::UNRESOLVED_AND),
        }
    }
}

impl FromStr for DetectedCode {
    type Err = NlpError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || NlpError::MalformedCode {
            text: text.to_string(),
        };
        let text = text.trim();
        match text.parse::<i32>() {
            Ok(Self::NEGATION) => return Ok(DetectedCode::Negation),
            Ok(Self::UNRESOLVED_IT) => return Ok(DetectedCode::UnresolvedIt),
            Ok(Self::UNRESOLVED_AND) => return Ok(DetectedCode::UnresolvedAnd),
            Ok(_) => return Err(malformed()),
            Err(_) => {}
        }

        let (id, fraction) = text.split_once('.').ok_or_else(malformed)?;
        if fraction.is_empty()
            || fraction.len() > FRACTION_DIGITS
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(malformed());
        }
        let id: CommandId = id.parse().map_err(|_| malformed())?;
        let padded = format!("{fraction:0<width$}", width = FRACTION_DIGITS);
        let numerator: usize = padded.parse().map_err(|_| malformed())?;
        let condition = numerator.checked_sub(1).ok_or_else(malformed)?;
        DetectedCode::command(id, condition).map_err(|_| malformed())
    }
}

/// Join codes the way the device expects them: `"4.00001, 11.00002"`.
pub fn join_codes(codes: &[DetectedCode]) -> String {
    codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use testresult::TestResult;

    #[test]
    fn formats_like_the_device_expects() -> TestResult {
        assert_eq!(DetectedCode::command(11, 1)?.to_string(), "11.00002");
        assert_eq!(DetectedCode::command(4, 0)?.to_string(), "4.00001");
        assert_eq!(DetectedCode::command(11, 9)?.to_string(), "11.0001");
        assert_eq!(DetectedCode::command(3, 99_998)?.to_string(), "3.99999");
        assert_eq!(DetectedCode::UnresolvedIt.to_string(), "-10");
        Ok(())
    }

    #[test]
    fn parses_control_and_command_codes() -> TestResult {
        assert_eq!("-10".parse::<DetectedCode>()?, DetectedCode::UnresolvedIt);
        assert_eq!("-11".parse::<DetectedCode>()?, DetectedCode::UnresolvedAnd);
        assert_eq!(
            "21.00004".parse::<DetectedCode>()?,
            DetectedCode::Command { id: 21, condition: 3 }
        );
        assert_eq!(
            "11.0001".parse::<DetectedCode>()?,
            DetectedCode::Command { id: 11, condition: 9 }
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_codes() {
        for text in ["", "7", "-3", "4.", "4.000001", "4.00000", "x.00001", "4.0a001", "0.00001"] {
            assert!(text.parse::<DetectedCode>().is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn encoding_limits() {
        assert!(DetectedCode::command(0, 0).is_err());
        assert!(DetectedCode::command(1, MAX_CONDITIONS).is_err());
    }

    proptest! {
        #[test]
        fn fraction_is_strictly_between_zero_and_one(id in 1u32..100_000, condition in 0usize..MAX_CONDITIONS) {
            let code = DetectedCode::command(id, condition).unwrap();
            let fraction = code.as_f64() - f64::from(id);
            prop_assert!(fraction > 0.0 && fraction < 1.0);
            prop_assert_eq!(code.to_string().parse::<DetectedCode>().unwrap(), code);
        }
    }
}
