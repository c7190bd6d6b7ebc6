//! Platform capability seams.
//!
//! The keypad core only demands these capabilities on visibility transitions, the
//! implementations live with the host per target platform. Hosts without a capability
//! use the `Nil*` implementations.

use crate::config::{FieldId, PadConfig};

/// Blocks screen capture while the keypad is visible.
pub trait ScreenGuard {
    /// Called when the keypad shows.
    fn enable_secure_mode(&mut self);

    /// Called when the keypad hides.
    ///
    /// The configuration of the closed session is provided, platforms restore
    /// capture settings from it.
    fn disable_secure_mode(&mut self, config: &PadConfig);
}

/// No-op [`ScreenGuard`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NilScreenGuard;
impl ScreenGuard for NilScreenGuard {
    fn enable_secure_mode(&mut self) {}
    fn disable_secure_mode(&mut self, _: &PadConfig) {}
}

/// Host input glue.
pub trait HostInput {
    /// Force the native software keyboard to resign, the two input methods are never
    /// visible together.
    fn dismiss_native_keyboard(&mut self);

    /// Scroll the `target` field into view, called after the keypad settles.
    fn scroll_into_view(&mut self, target: FieldId);
}

/// No-op [`HostInput`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NilHostInput;
impl HostInput for NilHostInput {
    fn dismiss_native_keyboard(&mut self) {}
    fn scroll_into_view(&mut self, _: FieldId) {}
}
