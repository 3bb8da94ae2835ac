//! What a caller hands to the detector.

use crate::context::CarryOver;

/// Switches for one detection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Keep only the last of consecutive codes with the same command id.
    pub collapse_repeats: bool,

    /// Let a detected command consume its words so later triggers cannot
    /// match them again.
    pub invalidate_consumed: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        DetectOptions {
            collapse_repeats: false,
            invalidate_consumed: true,
        }
    }
}

impl DetectOptions {
    pub fn collapse_repeats(mut self, collapse: bool) -> Self {
        self.collapse_repeats = collapse;
        self
    }

    pub fn invalidate_consumed(mut self, invalidate: bool) -> Self {
        self.invalidate_consumed = invalidate;
        self
    }
}

/// One spoken sentence plus the context left by the previous turn.
#[derive(Debug, Clone, Default)]
pub struct Input {
    /// The recognized text, as the speech recognizer produced it.
    pub text: String,

    /// Antecedents for "it" and "and" carried over from the last call.
    pub carry: CarryOver,

    pub options: DetectOptions,
}

impl Input {
    pub fn new(text: impl Into<String>) -> Self {
        Input {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_carry(mut self, carry: impl Into<CarryOver>) -> Self {
        self.carry = carry.into();
        self
    }

    pub fn with_options(mut self, options: DetectOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Phrase;

    #[test]
    fn defaults_invalidate_without_collapsing() {
        let input = Input::new("turn on the wifi");
        assert!(input.options.invalidate_consumed);
        assert!(!input.options.collapse_repeats);
        assert!(input.carry.is_empty());
    }

    #[test]
    fn builder_sets_carry_and_options() {
        let input = Input::new("turn it off")
            .with_carry("wifi|turn on|")
            .with_options(DetectOptions::default().collapse_repeats(true).invalidate_consumed(false));
        assert_eq!(input.carry.noun, Phrase::from("wifi"));
        assert!(input.options.collapse_repeats);
        assert!(!input.options.invalidate_consumed);
    }
}
