//! USB HID keyboard usage IDs (usage page 0x07).
//!
//! Only the keys common to US keyboards are named. Layout-specific keys such
//! as the ISO key left of Z are reachable through [`Keycode::KEYPAD_BACKSLASH`]
//! and [`Keycode::POUND`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::keyboard::Modifiers;

/// One 8-bit HID keyboard usage ID. `0` means "no key".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keycode(pub u8);

macro_rules! keycodes {
    ($($name:ident = $value:expr),* $(,)?) => {
        impl Keycode {
            $(pub const $name: Keycode = Keycode($value);)*
        }

        /// Canonical names come before their aliases.
        const NAMED: &[(&str, Keycode)] = &[$((stringify!($name), Keycode($value))),*];
    };
}

keycodes! {
    NONE = 0x00,

    A = 0x04, B = 0x05, C = 0x06, D = 0x07, E = 0x08, F = 0x09, G = 0x0A,
    H = 0x0B, I = 0x0C, J = 0x0D, K = 0x0E, L = 0x0F, M = 0x10, N = 0x11,
    O = 0x12, P = 0x13, Q = 0x14, R = 0x15, S = 0x16, T = 0x17, U = 0x18,
    V = 0x19, W = 0x1A, X = 0x1B, Y = 0x1C, Z = 0x1D,

    ONE = 0x1E, TWO = 0x1F, THREE = 0x20, FOUR = 0x21, FIVE = 0x22,
    SIX = 0x23, SEVEN = 0x24, EIGHT = 0x25, NINE = 0x26, ZERO = 0x27,

    ENTER = 0x28,
    RETURN = 0x28,
    ESCAPE = 0x29,
    BACKSPACE = 0x2A,
    TAB = 0x2B,
    SPACEBAR = 0x2C,
    SPACE = 0x2C,
    MINUS = 0x2D,
    EQUALS = 0x2E,
    LEFT_BRACKET = 0x2F,
    RIGHT_BRACKET = 0x30,
    BACKSLASH = 0x31,
    // Non-US # and ~
    POUND = 0x32,
    SEMICOLON = 0x33,
    QUOTE = 0x34,
    GRAVE_ACCENT = 0x35,
    COMMA = 0x36,
    PERIOD = 0x37,
    FORWARD_SLASH = 0x38,
    CAPS_LOCK = 0x39,

    F1 = 0x3A, F2 = 0x3B, F3 = 0x3C, F4 = 0x3D, F5 = 0x3E, F6 = 0x3F,
    F7 = 0x40, F8 = 0x41, F9 = 0x42, F10 = 0x43, F11 = 0x44, F12 = 0x45,

    PRINT_SCREEN = 0x46,
    SCROLL_LOCK = 0x47,
    PAUSE = 0x48,
    INSERT = 0x49,
    HOME = 0x4A,
    PAGE_UP = 0x4B,
    DELETE = 0x4C,
    END = 0x4D,
    PAGE_DOWN = 0x4E,
    RIGHT_ARROW = 0x4F,
    LEFT_ARROW = 0x50,
    DOWN_ARROW = 0x51,
    UP_ARROW = 0x52,

    KEYPAD_NUMLOCK = 0x53,
    KEYPAD_FORWARD_SLASH = 0x54,
    KEYPAD_ASTERISK = 0x55,
    KEYPAD_MINUS = 0x56,
    KEYPAD_PLUS = 0x57,
    KEYPAD_ENTER = 0x58,
    KEYPAD_ONE = 0x59,
    KEYPAD_TWO = 0x5A,
    KEYPAD_THREE = 0x5B,
    KEYPAD_FOUR = 0x5C,
    KEYPAD_FIVE = 0x5D,
    KEYPAD_SIX = 0x5E,
    KEYPAD_SEVEN = 0x5F,
    KEYPAD_EIGHT = 0x60,
    KEYPAD_NINE = 0x61,
    KEYPAD_ZERO = 0x62,
    KEYPAD_PERIOD = 0x63,
    // Non-US \ and |
    KEYPAD_BACKSLASH = 0x64,

    APPLICATION = 0x65,
    POWER = 0x66,
    KEYPAD_EQUALS = 0x67,

    F13 = 0x68, F14 = 0x69, F15 = 0x6A, F16 = 0x6B, F17 = 0x6C, F18 = 0x6D, F19 = 0x6E,

    LEFT_CONTROL = 0xE0,
    CONTROL = 0xE0,
    LEFT_SHIFT = 0xE1,
    SHIFT = 0xE1,
    LEFT_ALT = 0xE2,
    ALT = 0xE2,
    OPTION = 0xE2,
    LEFT_GUI = 0xE3,
    GUI = 0xE3,
    WINDOWS = 0xE3,
    COMMAND = 0xE3,
    RIGHT_CONTROL = 0xE4,
    RIGHT_SHIFT = 0xE5,
    RIGHT_ALT = 0xE6,
    ALTGR = 0xE6,
    RIGHT_GUI = 0xE7,
}

impl Keycode {
    pub const FIRST_MODIFIER: u8 = 0xE0;
    pub const LAST_MODIFIER: u8 = 0xE7;

    pub const fn code(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::FIRST_MODIFIER && self.0 <= Self::LAST_MODIFIER
    }

    /// Bit this keycode occupies in the modifier byte, or `None` for regular keys.
    pub fn modifier_bit(self) -> Option<Modifiers> {
        if self.is_modifier() {
            Some(Modifiers::from_bits_retain(1 << (self.0 - Self::FIRST_MODIFIER)))
        } else {
            None
        }
    }

    /// Canonical name, e.g. `LEFT_SHIFT` for 0xE1.
    pub fn name(self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(_, keycode)| *keycode == self)
            .map(|(name, _)| *name)
    }

    /// Resolve a key name case-insensitively. `-` and spaces count as `_`.
    pub fn from_name(name: &str) -> Option<Keycode> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        NAMED
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|(_, keycode)| *keycode)
    }

    pub fn all_named() -> impl Iterator<Item = (&'static str, Keycode)> {
        NAMED.iter().copied()
    }
}

impl From<u8> for Keycode {
    fn from(code: u8) -> Self {
        Keycode(code)
    }
}

impl From<Keycode> for u8 {
    fn from(keycode: Keycode) -> Self {
        keycode.0
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02x}", self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown key name '{0}'")]
pub struct UnknownKeycode(pub String);

/// Accepts key names (`a`, `left-shift`, `F5`) and raw codes (`0x04`).
impl FromStr for Keycode {
    type Err = UnknownKeycode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(keycode) = Keycode::from_name(s) {
            return Ok(keycode);
        }
        let trimmed = s.trim();
        trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .map(Keycode)
            .ok_or_else(|| UnknownKeycode(s.to_string()))
    }
}
