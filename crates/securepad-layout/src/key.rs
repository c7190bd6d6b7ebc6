//! Keypad key model.

use serde::{Deserialize, Serialize};

/// Kind of keypad key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    /// Key inserts a character in the input buffer.
    Char,
    /// Key triggers a control operation.
    Action,
}

/// Control operation triggered by an action key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    /// Removes the last character of the input buffer.
    Backspace,
    /// Commits the input buffer to the caller.
    Done,
    /// Removes all characters of the input buffer.
    Clear,
    /// Toggles uppercase input.
    Shift,
    /// Inert filler, occupies a grid cell for visual alignment only.
    Blank,
    /// Toggles the special characters layout.
    SpecialChars,
}

/// A single keypad key.
///
/// Char keys carry their lowercase and uppercase character pair, action keys carry
/// the control operation, so a key is always exactly one of the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Inserts a character in the input buffer.
    Char {
        /// Character inserted when uppercase input is not active.
        lower: char,
        /// Character inserted when uppercase input is active.
        upper: char,
    },
    /// Triggers a control operation.
    Action(KeyAction),
}
impl Key {
    /// New char key, the uppercase pair is derived from `lower`.
    ///
    /// Characters that uppercase to more than one character keep only the first,
    /// characters without an uppercase form repeat `lower`.
    pub fn char(lower: char) -> Self {
        let upper = lower.to_uppercase().next().unwrap_or(lower);
        Key::Char { lower, upper }
    }

    /// New action key.
    pub fn action(action: KeyAction) -> Self {
        Key::Action(action)
    }

    /// Key kind.
    pub fn kind(self) -> KeyKind {
        match self {
            Key::Char { .. } => KeyKind::Char,
            Key::Action(_) => KeyKind::Action,
        }
    }

    /// Control operation, if the key is an action key.
    pub fn as_action(self) -> Option<KeyAction> {
        match self {
            Key::Char { .. } => None,
            Key::Action(a) => Some(a),
        }
    }

    /// Character produced by the key, uppercase if `caps`.
    ///
    /// Is `None` for action keys.
    pub fn char_for(self, caps: bool) -> Option<char> {
        match self {
            Key::Char { lower, upper } => Some(if caps { upper } else { lower }),
            Key::Action(_) => None,
        }
    }

    /// If the key is the inert filler.
    pub fn is_blank(self) -> bool {
        matches!(self, Key::Action(KeyAction::Blank))
    }
}
