//! Transport layer for emulated USB HID devices
//!
//! This crate holds everything the device classes share: the error taxonomy,
//! the [`HidTransport`] capability trait, the fixed-width [`ReportBuffer`]
//! model, and the device locator that picks a transport by usage and waits
//! for it to become ready.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod locator;
pub mod mock;
pub mod report;
pub mod serde_millis;
pub mod transport;
pub mod usage;

pub use locator::*;
pub use report::*;
pub use transport::*;
pub use usage::*;

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HidError {
    #[error("Could not find matching HID device (usage page 0x{usage_page:02x}, usage 0x{usage:02x})")]
    DeviceNotFound { usage_page: u16, usage: u16 },

    #[error("HID device not ready after {}ms. Is USB connected?", waited.as_millis())]
    Timeout { waited: Duration },

    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Trying to press more than {max} keys at once")]
    Capacity { max: usize },

    #[error("No keycode available for character {character:?} ({}/0x{:02x})", u32::from(*character), u32::from(*character))]
    UnsupportedCharacter { character: char },

    #[error("HID device is not ready")]
    NotReady,

    #[error("Failed to send report: {0}")]
    Transport(String),
}

impl HidError {
    /// Build an [`HidError::OutOfRange`] after checking `value` against `min..=max`.
    pub fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> HidResult<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(HidError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }

    /// Whether the readiness probe may retry after this error: any failure
    /// of the transport itself, as opposed to a rejected argument.
    pub fn is_retryable(&self) -> bool {
        matches!(self, HidError::NotReady | HidError::Transport(_))
    }
}

impl From<std::io::Error> for HidError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::NotConnected => HidError::NotReady,
            _ => HidError::Transport(e.to_string()),
        }
    }
}

pub type HidResult<T> = Result<T, HidError>;
