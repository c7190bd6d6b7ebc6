//! Key model and randomized layout generation for the securepad keypad.
//!
//! Layouts are generated once per keypad session from an injected random source, so
//! key positions differ between sessions and tests can assert structure with a seeded
//! generator.
//!
//! # Crate
//!
#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![warn(unused_extern_crates)]
#![warn(missing_docs)]

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

mod key;
pub use key::{Key, KeyAction, KeyKind};

/// Base keypad family.
///
/// The special characters layout is an overlay mode of [`AlphaNumeric`], not a family
/// of its own, see [`LayoutSet::current`].
///
/// [`AlphaNumeric`]: KeypadType::AlphaNumeric
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeypadType {
    /// Digits only.
    Numeric,
    /// Digits and letters, with a symbols overlay.
    AlphaNumeric,
}

/// Keys of one keypad row, rendered left-to-right.
pub type Row = Vec<Key>;

/// Ordered rows of keys for one keypad mode, rendered top-to-bottom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    rows: Vec<Row>,
}
impl Layout {
    /// Layout rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// The eagerly generated layouts of one keypad session.
///
/// Alphanumeric keypads carry the symbols overlay too, so the UI can toggle between
/// the two at runtime without regenerating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutSet {
    /// Numeric keypad.
    Numeric(Layout),
    /// Alphanumeric keypad and its symbols overlay.
    AlphaNumeric {
        /// Digits and letters.
        base: Layout,
        /// Symbols overlay.
        special: Layout,
    },
}
impl LayoutSet {
    /// Generates every layout reachable from the `keypad` family.
    pub fn generate(keypad: KeypadType, shuffle: bool, rng: &mut impl Rng) -> Self {
        match keypad {
            KeypadType::Numeric => LayoutSet::Numeric(numeric(shuffle, rng)),
            KeypadType::AlphaNumeric => LayoutSet::AlphaNumeric {
                base: alphanumeric(shuffle, rng),
                special: special_chars(rng),
            },
        }
    }

    /// Layout to render, given the special characters overlay flag.
    ///
    /// The flag only selects the overlay for alphanumeric keypads.
    pub fn current(&self, special_active: bool) -> &Layout {
        match self {
            LayoutSet::Numeric(l) => l,
            LayoutSet::AlphaNumeric { base, special } => {
                if special_active {
                    special
                } else {
                    base
                }
            }
        }
    }
}

/// Generates the layout for the `keypad` family.
///
/// With `shuffle` the digit rows are fully permuted, so digit positions differ per
/// session. Filler placement always draws from `rng`, structure is otherwise fixed,
/// see the row constants in this module.
pub fn generate(keypad: KeypadType, shuffle: bool, rng: &mut impl Rng) -> Layout {
    match keypad {
        KeypadType::Numeric => numeric(shuffle, rng),
        KeypadType::AlphaNumeric => alphanumeric(shuffle, rng),
    }
}

const NUMERIC_ROWS: &[&str] = &["1234", "5678", "90"];
const NUMERIC_WIDTH: usize = 4;

const ALPHA_DIGIT_ROW: &str = "1234567890";
const ALPHA_ROWS: &[&str] = &["qwertyuio", "pasdfgh"];
const ALPHA_SHIFT_ROW: &str = "jklzxcvbnm";
const ALPHA_WIDTH: usize = 9;

const SYM_TOP_ROW: &str = "!@#$%^&*()";
const SYM_ROWS: &[&str] = &["-=[]\\;,./", "_+{}|:\""];
const SYM_SHIFT_ROW: &str = "<>?~`€£¥₩§";

fn numeric(shuffle: bool, rng: &mut impl Rng) -> Layout {
    let mut rows = Vec::with_capacity(NUMERIC_ROWS.len() + 1);
    for tpl in NUMERIC_ROWS {
        let mut row = char_row(tpl);
        pad_row(&mut row, NUMERIC_WIDTH, rng);
        if shuffle {
            row.shuffle(rng);
        }
        rows.push(row);
    }
    rows.push(vec![
        Key::action(KeyAction::Clear),
        Key::action(KeyAction::Backspace),
        Key::action(KeyAction::Done),
    ]);
    Layout { rows }
}

fn alphanumeric(shuffle: bool, rng: &mut impl Rng) -> Layout {
    let mut digits = char_row(ALPHA_DIGIT_ROW);
    if shuffle {
        digits.shuffle(rng);
    }
    content_layout(digits, ALPHA_ROWS, ALPHA_SHIFT_ROW, rng)
}

fn special_chars(rng: &mut impl Rng) -> Layout {
    content_layout(char_row(SYM_TOP_ROW), SYM_ROWS, SYM_SHIFT_ROW, rng)
}

fn content_layout(top_row: Row, rows_tpl: &[&str], shift_tpl: &str, rng: &mut impl Rng) -> Layout {
    let mut rows = Vec::with_capacity(rows_tpl.len() + 3);
    rows.push(top_row);
    for tpl in rows_tpl {
        let mut row = char_row(tpl);
        pad_row(&mut row, ALPHA_WIDTH, rng);
        rows.push(row);
    }
    rows.push(shift_row(shift_tpl, rng));
    rows.push(vec![
        Key::action(KeyAction::SpecialChars),
        Key::action(KeyAction::Clear),
        Key::action(KeyAction::Done),
    ]);
    Layout { rows }
}

fn char_row(tpl: &str) -> Row {
    tpl.chars().map(Key::char).collect()
}

/// Inserts `width - row.len()` filler keys at random positions.
///
/// A draw of the last index appends instead, preserving trailing-position placement
/// without an out-of-range insert.
fn pad_row(row: &mut Row, width: usize, rng: &mut impl Rng) {
    for _ in 0..width.saturating_sub(row.len()) {
        let i = rng.gen_range(0..width);
        // template rows are at most 2 short of the width, so `insert` is in bounds
        if i == width - 1 {
            row.push(Key::action(KeyAction::Blank));
        } else {
            row.insert(i, Key::action(KeyAction::Blank));
        }
    }
}

/// Builds `[Shift, <letters>, Backspace]` with one filler inserted at a random
/// position strictly after the shift key and before the backspace key.
fn shift_row(tpl: &str, rng: &mut impl Rng) -> Row {
    let mut row = Vec::with_capacity(tpl.chars().count() + 3);
    row.push(Key::action(KeyAction::Shift));
    row.extend(tpl.chars().map(Key::char));
    let i = rng.gen_range(1..=row.len());
    row.insert(i, Key::action(KeyAction::Blank));
    row.push(Key::action(KeyAction::Backspace));
    row
}
