//! Keypad configuration and caller hooks.

use std::fmt;

use securepad_layout::{Key, KeypadType};
use unic_langid::LanguageIdentifier;

/// Default obscuring glyph, a single bullet.
pub const DEFAULT_OBSCURING_CHAR: &str = "\u{2022}";

/// Identifies the host text field the keypad is attached to.
///
/// The value meaning is defined by the host, the keypad only relays it back in
/// [`HostInput::scroll_into_view`] calls.
///
/// [`HostInput::scroll_into_view`]: crate::platform::HostInput::scroll_into_view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(pub u64);

/// Keypad configuration, validated when the keypad is shown.
///
/// A new configuration is supplied on every [`SecurePad::show`], nothing carries over
/// from the previous session.
///
/// [`SecurePad::show`]: crate::pad::SecurePad::show
#[derive(Clone, Debug, PartialEq)]
pub struct PadConfig {
    /// Keypad family.
    pub keypad: KeypadType,

    /// Host field to scroll into view after the keypad settles.
    pub target: Option<FieldId>,

    /// Seeds the input buffer, truncated to `max_length`.
    pub initial_text: Option<String>,
    /// Shown in the input monitor while the buffer is empty, at reduced opacity.
    pub hint_text: Option<String>,

    /// Overrides the localized suffix of the length indicator text.
    pub length_symbol: Option<String>,
    /// Overrides the localized done key label.
    pub done_label: Option<String>,
    /// Overrides the localized clear key label.
    pub clear_label: Option<String>,
    /// Locale used to resolve the key labels not overridden above.
    ///
    /// Default is the `und` locale, that resolves to the neutral labels.
    pub lang: LanguageIdentifier,

    /// Glyph rendered in place of obscured buffer characters.
    ///
    /// Cannot be empty. Default is [`DEFAULT_OBSCURING_CHAR`].
    pub obscuring_char: String,

    /// Hard cap on the buffer length, input past it is ignored.
    ///
    /// Cannot be zero when set. Unbounded when `None`.
    pub max_length: Option<usize>,

    /// Always insert the uppercase character, the shift key becomes inert.
    pub always_caps: bool,
    /// Obscure the buffer in the input monitor, except the trailing character.
    pub obscure_text: bool,
    /// Randomize digit key positions per session.
    pub shuffle_numeric_keys: bool,
    /// Emit key preview bubble events while an alphanumeric char key is held.
    pub key_preview: bool,
}
impl PadConfig {
    /// New default configuration for the `keypad` family.
    pub fn new(keypad: KeypadType) -> Self {
        PadConfig {
            keypad,
            target: None,
            initial_text: None,
            hint_text: None,
            length_symbol: None,
            done_label: None,
            clear_label: None,
            lang: LanguageIdentifier::default(),
            obscuring_char: DEFAULT_OBSCURING_CHAR.to_owned(),
            max_length: None,
            always_caps: false,
            obscure_text: true,
            shuffle_numeric_keys: true,
            key_preview: true,
        }
    }

    /// Validates the configuration values.
    ///
    /// Called by [`SecurePad::show`] before any state mutation.
    ///
    /// [`SecurePad::show`]: crate::pad::SecurePad::show
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.obscuring_char.is_empty() {
            return Err(ConfigError::EmptyObscuringChar);
        }
        if self.max_length == Some(0) {
            return Err(ConfigError::ZeroMaxLength);
        }
        Ok(())
    }
}

/// Error for invalid [`PadConfig`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// [`PadConfig::obscuring_char`] is empty.
    EmptyObscuringChar,
    /// [`PadConfig::max_length`] is zero.
    ZeroMaxLength,
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyObscuringChar => write!(f, "obscuring char cannot be empty"),
            ConfigError::ZeroMaxLength => write!(f, "max length cannot be zero"),
        }
    }
}
impl std::error::Error for ConfigError {}

/// Caller hooks, invoked synchronously during dispatch.
///
/// All hooks are optional, the keypad works with any subset set.
#[derive(Default)]
pub struct PadHooks {
    /// Called for every non-filler key press.
    pub on_key: Option<Box<dyn FnMut(&Key)>>,
    /// Called when the buffer changes, with the full buffer.
    pub on_change: Option<Box<dyn FnMut(&[char])>>,
    /// Called when the done key commits the buffer.
    pub on_done: Option<Box<dyn FnMut(&[char])>>,
    /// Called when the keypad hides.
    pub on_close: Option<Box<dyn FnMut()>>,
}
impl fmt::Debug for PadHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PadHooks")
            .field("on_key", &self.on_key.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_done", &self.on_done.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PadConfig::new(KeypadType::Numeric);
        assert_eq!(config.obscuring_char, "\u{2022}");
        assert!(config.obscure_text);
        assert!(config.shuffle_numeric_keys);
        assert!(!config.always_caps);
        assert_eq!(config.max_length, None);
        assert_eq!(config.lang.to_string(), "und");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_obscuring_char() {
        let mut config = PadConfig::new(KeypadType::Numeric);
        config.obscuring_char = String::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyObscuringChar));
    }

    #[test]
    fn rejects_zero_max_length() {
        let mut config = PadConfig::new(KeypadType::AlphaNumeric);
        config.max_length = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxLength));
    }
}
