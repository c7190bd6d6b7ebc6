//! Keypad controller integration tests.

use std::{cell::RefCell, rc::Rc, time::Instant};

use securepad::{
    config::{FieldId, PadConfig, PadHooks},
    layout::{Key, KeyAction, KeypadType},
    pad::{KeyBounds, PreviewEvent, SecurePad},
    platform::{HostInput, ScreenGuard},
    timer::{REPEAT_DELAY, REPEAT_INTERVAL, SETTLE_DELAY},
};

#[derive(Clone, Default)]
struct PlatformLog(Rc<RefCell<Vec<String>>>);
impl PlatformLog {
    fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
    fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }
}

struct LogScreenGuard(PlatformLog);
impl ScreenGuard for LogScreenGuard {
    fn enable_secure_mode(&mut self) {
        self.0.push("secure on");
    }
    fn disable_secure_mode(&mut self, _: &PadConfig) {
        self.0.push("secure off");
    }
}

struct LogHostInput(PlatformLog);
impl HostInput for LogHostInput {
    fn dismiss_native_keyboard(&mut self) {
        self.0.push("dismiss native");
    }
    fn scroll_into_view(&mut self, target: FieldId) {
        self.0.push(format!("scroll {}", target.0));
    }
}

fn pad_with_log() -> (SecurePad, PlatformLog) {
    let log = PlatformLog::default();
    let pad = SecurePad::with_platform(
        Box::new(LogScreenGuard(log.clone())),
        Box::new(LogHostInput(log.clone())),
    );
    (pad, log)
}

#[test]
fn numeric_end_to_end() {
    let mut pad = SecurePad::new();
    let changes = Rc::new(RefCell::new(vec![]));
    let done = Rc::new(RefCell::new(None));

    let mut config = PadConfig::new(KeypadType::Numeric);
    config.max_length = Some(4);
    let hooks = PadHooks {
        on_change: Some(Box::new({
            let changes = changes.clone();
            move |b: &[char]| changes.borrow_mut().push(b.iter().map(|&c| c as u32).collect::<Vec<_>>())
        })),
        on_done: Some(Box::new({
            let done = done.clone();
            move |b: &[char]| *done.borrow_mut() = Some(b.iter().map(|&c| c as u32).collect::<Vec<_>>())
        })),
        ..Default::default()
    };
    pad.show(config, hooks).unwrap();

    for c in ['1', '2', '3', '4'] {
        pad.dispatch(Key::char(c));
    }
    assert_eq!(
        pad.session().unwrap().char_codes().collect::<Vec<_>>(),
        [49, 50, 51, 52]
    );

    // full buffer, ignored without notification
    pad.dispatch(Key::char('5'));
    assert_eq!(
        pad.session().unwrap().char_codes().collect::<Vec<_>>(),
        [49, 50, 51, 52]
    );
    assert_eq!(changes.borrow().len(), 4);

    pad.dispatch(Key::action(KeyAction::Backspace));
    assert_eq!(pad.session().unwrap().char_codes().collect::<Vec<_>>(), [49, 50, 51]);

    pad.dispatch(Key::action(KeyAction::Done));
    assert_eq!(*done.borrow(), Some(vec![49, 50, 51]));
    assert!(!pad.is_showing());
}

#[test]
fn obscured_monitor_text() {
    let mut pad = SecurePad::new();
    let mut config = PadConfig::new(KeypadType::AlphaNumeric);
    config.hint_text = Some("password".to_owned());
    pad.show(config, PadHooks::default()).unwrap();

    assert_eq!(pad.display_text().unwrap(), "");
    assert_eq!(pad.config().unwrap().hint_text.as_deref(), Some("password"));

    for c in "hello".chars() {
        pad.dispatch(Key::char(c));
    }
    assert_eq!(pad.display_text().unwrap(), "\u{2022}\u{2022}\u{2022}\u{2022}o");
    assert_eq!(pad.length_text().unwrap(), "5 chars");

    pad.set_view_enabled(true);
    assert_eq!(pad.display_text().unwrap(), "hello");
}

#[test]
fn backspace_repeats_while_held() {
    let mut pad = SecurePad::new();
    pad.show(PadConfig::new(KeypadType::Numeric), PadHooks::default()).unwrap();
    for c in "123456".chars() {
        pad.dispatch(Key::char(c));
    }

    let now = Instant::now();
    pad.press_begin(Key::action(KeyAction::Backspace), KeyBounds::default(), now);

    // nothing before the hold delay elapses
    pad.update(now + REPEAT_DELAY - REPEAT_INTERVAL);
    assert_eq!(pad.session().unwrap().buffer().len(), 6);

    pad.update(now + REPEAT_DELAY);
    assert_eq!(pad.session().unwrap().buffer().len(), 5);

    pad.update(now + REPEAT_DELAY + 2 * REPEAT_INTERVAL);
    assert_eq!(pad.session().unwrap().buffer().len(), 3);

    // release cancels, a pending tick never fires late
    pad.press_end();
    pad.update(now + REPEAT_DELAY + 20 * REPEAT_INTERVAL);
    assert_eq!(pad.session().unwrap().buffer().len(), 3);
}

#[test]
fn settle_scrolls_target_into_view() {
    let (mut pad, log) = pad_with_log();
    let mut config = PadConfig::new(KeypadType::Numeric);
    config.target = Some(FieldId(7));
    pad.show(config, PadHooks::default()).unwrap();

    let now = Instant::now();
    pad.update(now);
    assert!(!log.entries().iter().any(|e| e.starts_with("scroll")));

    pad.update(now + SETTLE_DELAY);
    assert!(log.entries().contains(&"scroll 7".to_owned()));
}

#[test]
fn hidden_before_settle_skips_scroll() {
    let (mut pad, log) = pad_with_log();
    let mut config = PadConfig::new(KeypadType::Numeric);
    config.target = Some(FieldId(7));
    pad.show(config, PadHooks::default()).unwrap();

    pad.hide();
    let now = Instant::now();
    pad.update(now + 2 * SETTLE_DELAY);
    assert!(!log.entries().iter().any(|e| e.starts_with("scroll")));
}

#[test]
fn reconfigured_target_replaces_stale_settle() {
    let (mut pad, log) = pad_with_log();
    let mut config = PadConfig::new(KeypadType::Numeric);
    config.target = Some(FieldId(7));
    pad.show(config, PadHooks::default()).unwrap();

    // reconfigured without a target before the settle delay elapses
    pad.show(PadConfig::new(KeypadType::Numeric), PadHooks::default()).unwrap();
    let now = Instant::now();
    pad.update(now + 2 * SETTLE_DELAY);
    assert!(!log.entries().iter().any(|e| e.starts_with("scroll")));
}

#[test]
fn screen_guard_lifecycle() {
    let (mut pad, log) = pad_with_log();

    pad.show(PadConfig::new(KeypadType::Numeric), PadHooks::default()).unwrap();
    assert_eq!(log.entries(), ["dismiss native", "secure on"]);

    // reconfigure keeps the secure mode on
    pad.show(PadConfig::new(KeypadType::AlphaNumeric), PadHooks::default()).unwrap();
    assert_eq!(log.entries(), ["dismiss native", "secure on", "dismiss native"]);

    pad.hide();
    assert_eq!(log.entries(), ["dismiss native", "secure on", "dismiss native", "secure off"]);
}

#[test]
fn preview_bubble_events() {
    let mut pad = SecurePad::new();
    let events = Rc::new(RefCell::new(vec![]));
    let _handle = pad.on_preview({
        let events = events.clone();
        move |e: &PreviewEvent| events.borrow_mut().push(*e)
    });

    pad.show(PadConfig::new(KeypadType::AlphaNumeric), PadHooks::default()).unwrap();
    let now = Instant::now();
    pad.press_begin(Key::char('a'), KeyBounds::default(), now);
    pad.press_end();

    pad.dispatch(Key::action(KeyAction::Shift));
    pad.press_begin(Key::char('a'), KeyBounds::default(), now);
    pad.press_end();

    let events = events.borrow();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], PreviewEvent::Start { text: 'a', .. }));
    assert_eq!(events[1], PreviewEvent::End);
    assert!(matches!(events[2], PreviewEvent::Start { text: 'A', .. }));
    assert_eq!(events[3], PreviewEvent::End);
}

#[test]
fn no_preview_for_numeric_keypads() {
    let mut pad = SecurePad::new();
    let events = Rc::new(RefCell::new(0));
    let _handle = pad.on_preview({
        let events = events.clone();
        move |_: &PreviewEvent| *events.borrow_mut() += 1
    });

    pad.show(PadConfig::new(KeypadType::Numeric), PadHooks::default()).unwrap();
    pad.press_begin(Key::char('1'), KeyBounds::default(), Instant::now());
    pad.press_end();
    assert_eq!(*events.borrow(), 0);
}

#[test]
fn buffer_changed_stream_sees_every_change() {
    let mut pad = SecurePad::new();
    let monitor = Rc::new(RefCell::new(vec![]));
    let _handle = pad.on_buffer_changed({
        let monitor = monitor.clone();
        move |b: &[char]| monitor.borrow_mut().push(b.len())
    });

    pad.show(PadConfig::new(KeypadType::Numeric), PadHooks::default()).unwrap();
    pad.dispatch(Key::char('1'));
    pad.dispatch(Key::char('2'));
    pad.dispatch(Key::action(KeyAction::Backspace));
    pad.dispatch(Key::action(KeyAction::Clear));

    assert_eq!(&*monitor.borrow(), &[1, 2, 1, 0]);
}
