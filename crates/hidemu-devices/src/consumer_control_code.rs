//! Consumer page (0x0C) usage IDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 16-bit consumer control usage. `0` releases whatever was active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsumerControlCode(pub u16);

impl ConsumerControlCode {
    pub const NONE: Self = Self(0x00);
    pub const BRIGHTNESS_INCREMENT: Self = Self(0x6F);
    pub const BRIGHTNESS_DECREMENT: Self = Self(0x70);
    pub const RECORD: Self = Self(0xB2);
    pub const FAST_FORWARD: Self = Self(0xB3);
    pub const REWIND: Self = Self(0xB4);
    pub const SCAN_NEXT_TRACK: Self = Self(0xB5);
    pub const SCAN_PREVIOUS_TRACK: Self = Self(0xB6);
    pub const STOP: Self = Self(0xB7);
    pub const EJECT: Self = Self(0xB8);
    pub const PLAY_PAUSE: Self = Self(0xCD);
    pub const MUTE: Self = Self(0xE2);
    pub const VOLUME_INCREMENT: Self = Self(0xE9);
    pub const VOLUME_DECREMENT: Self = Self(0xEA);

    const NAMED: &'static [(&'static str, ConsumerControlCode)] = &[
        ("BRIGHTNESS_INCREMENT", Self::BRIGHTNESS_INCREMENT),
        ("BRIGHTNESS_DECREMENT", Self::BRIGHTNESS_DECREMENT),
        ("RECORD", Self::RECORD),
        ("FAST_FORWARD", Self::FAST_FORWARD),
        ("REWIND", Self::REWIND),
        ("SCAN_NEXT_TRACK", Self::SCAN_NEXT_TRACK),
        ("SCAN_PREVIOUS_TRACK", Self::SCAN_PREVIOUS_TRACK),
        ("STOP", Self::STOP),
        ("EJECT", Self::EJECT),
        ("PLAY_PAUSE", Self::PLAY_PAUSE),
        ("MUTE", Self::MUTE),
        ("VOLUME_INCREMENT", Self::VOLUME_INCREMENT),
        ("VOLUME_DECREMENT", Self::VOLUME_DECREMENT),
    ];

    pub const fn code(self) -> u16 {
        self.0
    }

    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, code)| *code == self)
            .map(|(name, _)| *name)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace(['-', ' '], "_").to_ascii_uppercase();
        Self::NAMED
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|(_, code)| *code)
    }

    pub fn all_named() -> impl Iterator<Item = (&'static str, ConsumerControlCode)> {
        Self::NAMED.iter().copied()
    }
}

impl fmt::Display for ConsumerControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04x}", self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown consumer control code '{0}'")]
pub struct UnknownConsumerCode(pub String);

/// Accepts names (`play-pause`) and raw codes (`0xcd`).
impl FromStr for ConsumerControlCode {
    type Err = UnknownConsumerCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(code) = Self::from_name(s) {
            return Ok(code);
        }
        let trimmed = s.trim();
        trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .and_then(|hex| u16::from_str_radix(hex, 16).ok())
            .map(Self)
            .ok_or_else(|| UnknownConsumerCode(s.to_string()))
    }
}
