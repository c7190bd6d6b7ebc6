//! Secure keypad controller.
//!
//! # Examples
//!
//! ```
//! use securepad::config::{PadConfig, PadHooks};
//! use securepad::layout::KeypadType;
//! use securepad::pad::SecurePad;
//!
//! let mut pad = SecurePad::new();
//!
//! let mut config = PadConfig::new(KeypadType::Numeric);
//! config.max_length = Some(6);
//! let hooks = PadHooks {
//!     on_done: Some(Box::new(|pin: &[char]| {
//!         // encrypt and submit
//!         let _ = pin;
//!     })),
//!     ..Default::default()
//! };
//!
//! pad.show(config, hooks).unwrap();
//! assert!(pad.is_showing());
//! ```

use std::{mem, sync::Arc, time::Instant};

use securepad_layout::{Key, KeyAction, KeypadType, Layout, LayoutSet};

use crate::{
    config::{ConfigError, PadConfig, PadHooks},
    event::{SubscriberHandle, Subscribers},
    l10n::{LabelResolver, PadLabels},
    platform::{HostInput, NilHostInput, NilScreenGuard, ScreenGuard},
    session::InputSession,
    timer::{Deferred, RepeatTimer, SETTLE_DELAY},
};

/// Anchor rectangle of a pressed key, in the presentation coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct KeyBounds {
    /// Left offset.
    pub x: f32,
    /// Top offset.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Key preview bubble event.
///
/// Purely cosmetic, only emitted for char keys of alphanumeric keypads while
/// [`PadConfig::key_preview`] is enabled. Has no state impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreviewEvent {
    /// Hold started on a char key.
    Start {
        /// Character the key produces under the current caps state.
        text: char,
        /// Pressed key anchor, for bubble placement and sizing.
        bounds: KeyBounds,
    },
    /// Hold ended.
    End,
}

/// Secure keypad controller.
///
/// The host application owns one instance, it is the sole authority over keypad
/// visibility and the current configuration. Everything is synchronous on the host UI
/// loop; the host forwards key taps to [`dispatch`](Self::dispatch), hold gestures to
/// [`press_begin`](Self::press_begin)/[`press_end`](Self::press_end) and pumps
/// [`update`](Self::update) so held-key timers elapse.
pub struct SecurePad {
    config: Option<PadConfig>,
    hooks: PadHooks,
    labels: PadLabels,
    resolver: LabelResolver,
    session: Option<InputSession>,
    layouts: Option<LayoutSet>,
    repeat: RepeatTimer,
    settle: Deferred,
    preview_active: bool,
    changed: Arc<Subscribers<Vec<char>>>,
    visibility: Subscribers<bool>,
    preview: Subscribers<PreviewEvent>,
    screen_guard: Box<dyn ScreenGuard>,
    host: Box<dyn HostInput>,
}
impl Default for SecurePad {
    fn default() -> Self {
        Self::new()
    }
}
impl SecurePad {
    /// New hidden keypad with no-op platform glue.
    pub fn new() -> Self {
        Self::with_platform(Box::new(NilScreenGuard), Box::new(NilHostInput))
    }

    /// New hidden keypad with the platform capability implementations.
    pub fn with_platform(screen_guard: Box<dyn ScreenGuard>, host: Box<dyn HostInput>) -> Self {
        SecurePad {
            config: None,
            hooks: PadHooks::default(),
            labels: PadLabels::neutral(),
            resolver: LabelResolver::default(),
            session: None,
            layouts: None,
            repeat: RepeatTimer::default(),
            settle: Deferred::default(),
            preview_active: false,
            changed: Arc::new(Subscribers::new()),
            visibility: Subscribers::new(),
            preview: Subscribers::new(),
            screen_guard,
            host,
        }
    }

    /// Replaces the label resolver used by subsequent [`show`](Self::show) calls.
    pub fn set_label_resolver(&mut self, resolver: LabelResolver) {
        self.resolver = resolver;
    }

    /// If the keypad is visible.
    pub fn is_showing(&self) -> bool {
        self.config.is_some()
    }

    /// Shows the keypad, or reconfigures it if it is already showing.
    ///
    /// The input session is (re)initialized from the `config`, the key layouts are
    /// regenerated with fresh randomness and the native software keyboard is dismissed.
    /// Reconfiguring does not notify visibility, the keypad never left the screen.
    ///
    /// The `config` is validated before any state mutation.
    pub fn show(&mut self, config: PadConfig, hooks: PadHooks) -> Result<(), ConfigError> {
        config.validate()?;

        let reconfigure = self.is_showing();

        self.labels = self.resolver.resolve(&config.lang).clone();
        if let Some(done) = &config.done_label {
            self.labels.done = done.clone();
        }
        if let Some(clear) = &config.clear_label {
            self.labels.clear = clear.clone();
        }

        let mut rng = rand::thread_rng();
        self.layouts = Some(LayoutSet::generate(config.keypad, config.shuffle_numeric_keys, &mut rng));
        self.session = Some(InputSession::new(&config, self.changed.clone()));
        self.repeat.stop();
        self.preview_active = false;

        if config.target.is_some() {
            self.settle.schedule(Instant::now(), SETTLE_DELAY);
        } else {
            self.settle.cancel();
        }

        self.hooks = hooks;
        self.config = Some(config);

        self.host.dismiss_native_keyboard();
        if reconfigure {
            tracing::debug!("keypad reconfigured");
        } else {
            self.screen_guard.enable_secure_mode();
            self.visibility.notify(&true);
            tracing::debug!("keypad shown");
        }
        Ok(())
    }

    /// Hides the keypad.
    ///
    /// The session and layouts are dropped, pending timers are cancelled, the screen
    /// guard is released and the `on_close` hook is called. A hidden keypad ignores
    /// the call.
    pub fn hide(&mut self) {
        let Some(config) = self.config.take() else {
            tracing::warn!("hide on hidden keypad");
            return;
        };

        self.session = None;
        self.layouts = None;
        self.repeat.stop();
        self.settle.cancel();
        self.preview_active = false;

        self.screen_guard.disable_secure_mode(&config);
        self.visibility.notify(&false);
        if let Some(on_close) = &mut self.hooks.on_close {
            on_close();
        }
        tracing::debug!("keypad hidden");
    }

    /// Applies a key tap.
    ///
    /// The done key additionally hides the keypad, after the `on_done` hook observed
    /// the committed buffer.
    pub fn dispatch(&mut self, key: Key) {
        let Some(session) = &mut self.session else {
            tracing::warn!("key dispatched while keypad is hidden");
            return;
        };
        session.dispatch(key, &mut self.hooks);

        if key.as_action() == Some(KeyAction::Done) {
            self.hide();
        }
    }

    /// Native software keyboard visibility changed.
    ///
    /// The secure keypad and the native keyboard are never visible together, the
    /// keypad hides itself when the native keyboard appears. Repeated events are
    /// idempotent.
    pub fn on_native_keyboard(&mut self, visible: bool) {
        if visible && self.is_showing() {
            tracing::debug!("native keyboard visible, hiding keypad");
            self.hide();
        }
    }

    /// Begins a key hold gesture.
    ///
    /// Holding backspace arms the repeat timer; holding an alphanumeric char key
    /// emits the preview bubble start event.
    pub fn press_begin(&mut self, key: Key, bounds: KeyBounds, now: Instant) {
        let Some(config) = &self.config else { return };

        if key.as_action() == Some(KeyAction::Backspace) {
            self.repeat.start(now);
        } else if config.key_preview && config.keypad == KeypadType::AlphaNumeric {
            if let Some(session) = &self.session {
                if let Some(text) = key.char_for(session.caps_active()) {
                    self.preview_active = true;
                    self.preview.notify(&PreviewEvent::Start { text, bounds });
                }
            }
        }
    }

    /// Ends the current key hold gesture.
    ///
    /// Disarms the repeat timer and emits the preview bubble end event if a preview
    /// was started.
    pub fn press_end(&mut self) {
        self.repeat.stop();
        if mem::take(&mut self.preview_active) {
            self.preview.notify(&PreviewEvent::End);
        }
    }

    /// Pumps the keypad timers.
    ///
    /// Elapsed repeat ticks synthesize backspace dispatches and the elapsed settle
    /// deadline scrolls the target field into view, skipped if the keypad was hidden
    /// or reconfigured without a target in the meantime.
    pub fn update(&mut self, now: Instant) {
        for _ in 0..self.repeat.poll(now) {
            if !self.is_showing() {
                break;
            }
            self.dispatch(Key::action(KeyAction::Backspace));
        }

        if self.settle.poll(now) {
            if let Some(target) = self.config.as_ref().and_then(|c| c.target) {
                self.host.scroll_into_view(target);
            }
        }
    }

    /// Sets the reveal gesture state, `true` only while the gesture is held.
    pub fn set_view_enabled(&mut self, enabled: bool) {
        if let Some(session) = &mut self.session {
            session.set_view_enabled(enabled);
        }
    }

    /// Rows of the layout for the current mode.
    ///
    /// Is `None` while hidden.
    pub fn layout(&self) -> Option<&Layout> {
        let layouts = self.layouts.as_ref()?;
        let special = self.session.as_ref().map(|s| s.special_chars()).unwrap_or(false);
        Some(layouts.current(special))
    }

    /// Current input session.
    ///
    /// Is `None` while hidden.
    pub fn session(&self) -> Option<&InputSession> {
        self.session.as_ref()
    }

    /// Current configuration.
    ///
    /// Is `None` while hidden.
    pub fn config(&self) -> Option<&PadConfig> {
        self.config.as_ref()
    }

    /// Labels resolved for the current session, config overrides applied.
    pub fn labels(&self) -> &PadLabels {
        &self.labels
    }

    /// Input monitor text, with the obscuring policy applied.
    ///
    /// Is `None` while hidden. Presentation renders [`PadConfig::hint_text`] at
    /// reduced opacity when this is empty.
    pub fn display_text(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        let config = self.config.as_ref()?;
        Some(session.display_text(&config.obscuring_char))
    }

    /// Input monitor length indicator text, `"<count><symbol>"`.
    ///
    /// Is `None` while hidden.
    pub fn length_text(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        let config = self.config.as_ref()?;
        let symbol = config.length_symbol.as_deref().unwrap_or(&self.labels.length_symbol);
        Some(session.length_text(symbol))
    }

    /// Subscribe to buffer change notifications, for the input monitor.
    ///
    /// Notified synchronously inside dispatch with the full buffer, before the
    /// `on_change` hook.
    pub fn on_buffer_changed(&self, mut monitor: impl FnMut(&[char]) + 'static) -> SubscriberHandle {
        self.changed.subscribe(move |buffer| monitor(buffer))
    }

    /// Subscribe to keypad visibility change notifications.
    pub fn on_visibility(&self, mut visible: impl FnMut(bool) + 'static) -> SubscriberHandle {
        self.visibility.subscribe(move |v| visible(*v))
    }

    /// Subscribe to key preview bubble events.
    pub fn on_preview(&self, mut preview: impl FnMut(&PreviewEvent) + 'static) -> SubscriberHandle {
        self.preview.subscribe(move |e| preview(e))
    }
}
