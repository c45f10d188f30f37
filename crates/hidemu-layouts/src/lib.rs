//! Keyboard layouts for emulated USB HID keyboards
//!
//! A [`KeyboardLayout`] turns text into the keystrokes a person would type on
//! a physical keyboard set to that locale, and drives a
//! [`hidemu_devices::Keyboard`] to send them.
//!
//! ```
//! use std::time::Duration;
//! use hidemu_devices::{DeviceConfig, Keyboard};
//! use hidemu_layouts::LayoutId;
//! use hidemu_transport::{Usage, mock::MockTransport};
//!
//! let device = MockTransport::new(Usage::KEYBOARD);
//! let mut keyboard = Keyboard::find([device.clone()], &DeviceConfig::default())?;
//! LayoutId::Fr.layout().write(&mut keyboard, "ê", Duration::ZERO)?;
//!
//! // probe, dead key down, up, vowel down, up
//! assert_eq!(device.send_count(), 5);
//! # Ok::<(), hidemu_transport::HidError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod fr;
pub mod layout;
pub mod registry;
pub mod us;
pub mod us_dvorak;

pub use fr::FR;
pub use layout::{ALTGR_FLAG, KeyboardLayout, Keystroke, SHIFT_FLAG};
pub use registry::{LayoutId, UnknownLayout};
pub use us::US;
pub use us_dvorak::US_DVORAK;
