//! Input session state and dispatch.

use std::{fmt, sync::Arc};

use securepad_layout::{Key, KeyAction};

use crate::{
    config::{PadConfig, PadHooks},
    event::Subscribers,
};

/// Input state of one keypad session.
///
/// Created when the keypad shows, replaced when it is reconfigured and dropped when it
/// hides, nothing carries across sessions except what the caller re-supplies.
pub struct InputSession {
    buffer: Vec<char>,
    max_length: Option<usize>,
    shift: bool,
    always_caps: bool,
    special_chars: bool,
    obscure_text: bool,
    view_enabled: bool,
    changed: Arc<Subscribers<Vec<char>>>,
}
impl fmt::Debug for InputSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the buffer content is the secret, only the length is printable
        f.debug_struct("InputSession")
            .field("buffer.len", &self.buffer.len())
            .field("max_length", &self.max_length)
            .field("shift", &self.shift)
            .field("always_caps", &self.always_caps)
            .field("special_chars", &self.special_chars)
            .field("view_enabled", &self.view_enabled)
            .finish_non_exhaustive()
    }
}
impl InputSession {
    pub(crate) fn new(config: &PadConfig, changed: Arc<Subscribers<Vec<char>>>) -> Self {
        let mut buffer = vec![];
        if let Some(text) = &config.initial_text {
            for c in text.chars() {
                if config.max_length.map_or(false, |m| buffer.len() >= m) {
                    break;
                }
                buffer.push(c);
            }
        }
        InputSession {
            buffer,
            max_length: config.max_length,
            shift: false,
            always_caps: config.always_caps,
            special_chars: false,
            obscure_text: config.obscure_text,
            view_enabled: false,
            changed,
        }
    }

    /// Applies a key press to the session state.
    ///
    /// Buffer changes notify the change subscribers and then the `on_change` hook. The
    /// `on_key` hook is called last, for every key except the inert filler.
    pub fn dispatch(&mut self, key: Key, hooks: &mut PadHooks) {
        match key {
            Key::Char { .. } => {
                if self.max_length.map_or(false, |m| self.buffer.len() >= m) {
                    // full buffer, input is ignored without notification
                } else if let Some(c) = key.char_for(self.caps_active()) {
                    self.buffer.push(c);
                    self.notify_changed(hooks);
                }
            }
            Key::Action(action) => match action {
                KeyAction::Backspace => {
                    if self.buffer.pop().is_some() {
                        self.notify_changed(hooks);
                    }
                }
                KeyAction::Done => {
                    if let Some(on_done) = &mut hooks.on_done {
                        on_done(&self.buffer);
                    }
                }
                KeyAction::Clear => {
                    self.buffer.clear();
                    self.notify_changed(hooks);
                }
                KeyAction::Shift => {
                    if !self.always_caps {
                        self.shift = !self.shift;
                    }
                }
                KeyAction::SpecialChars => {
                    self.special_chars = !self.special_chars;
                }
                KeyAction::Blank => return,
            },
        }
        if let Some(on_key) = &mut hooks.on_key {
            on_key(&key);
        }
    }

    fn notify_changed(&mut self, hooks: &mut PadHooks) {
        self.changed.notify(&self.buffer);
        if let Some(on_change) = &mut hooks.on_change {
            on_change(&self.buffer);
        }
    }

    /// Buffer characters, in typed order.
    pub fn buffer(&self) -> &[char] {
        &self.buffer
    }

    /// Buffer characters as Unicode code points.
    pub fn char_codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.buffer.iter().map(|&c| c as u32)
    }

    /// If uppercase input is active, by the shift toggle or configuration.
    pub fn caps_active(&self) -> bool {
        self.shift || self.always_caps
    }

    /// If the shift key is toggled on.
    pub fn shift(&self) -> bool {
        self.shift
    }

    /// If the symbols overlay is active.
    pub fn special_chars(&self) -> bool {
        self.special_chars
    }

    /// If the reveal gesture is held, the buffer renders in plaintext while `true`.
    pub fn view_enabled(&self) -> bool {
        self.view_enabled
    }

    /// Sets the reveal gesture state, notifies the change subscribers on change.
    pub fn set_view_enabled(&mut self, enabled: bool) {
        if self.view_enabled != enabled {
            self.view_enabled = enabled;
            self.changed.notify(&self.buffer);
        }
    }

    /// Input monitor text, with the obscuring policy applied.
    ///
    /// When obscuring is active every character renders as the `obscuring` glyph except
    /// the last, kept in plaintext as feedback for the most recent keystroke.
    pub fn display_text(&self, obscuring: &str) -> String {
        if self.obscure_text && !self.view_enabled {
            let mut text = String::new();
            for (i, &c) in self.buffer.iter().enumerate() {
                if i + 1 == self.buffer.len() {
                    text.push(c);
                } else {
                    text.push_str(obscuring);
                }
            }
            text
        } else {
            self.buffer.iter().collect()
        }
    }

    /// Length indicator text, `"<count><symbol>"`.
    pub fn length_text(&self, symbol: &str) -> String {
        format!("{}{}", self.buffer.len(), symbol)
    }
}
