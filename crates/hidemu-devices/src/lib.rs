//! HID device classes
//!
//! Each device class owns a fixed-width report, mutates it in response to
//! press/release/move calls and sends it through a [`HidTransport`]:
//!
//! | class              | usage        | report bytes                                 |
//! |--------------------|--------------|----------------------------------------------|
//! | [`Keyboard`]       | 0x01 / 0x06  | modifiers, reserved, 6 key slots             |
//! | [`Mouse`]          | 0x01 / 0x02  | buttons, x, y, wheel (signed)                |
//! | [`Gamepad`]        | 0x01 / 0x05  | 16 buttons (LE), x, y, z, rz (signed)        |
//! | [`Digitizer`]      | 0x0D / 0x02  | stylus bits, x (LE u16), y (LE u16)          |
//! | [`ConsumerControl`]| 0x0C / 0x01  | usage code (LE u16)                          |
//!
//! # Example
//!
//! ```
//! use hidemu_devices::{DeviceConfig, Keyboard, Keycode};
//! use hidemu_transport::{Usage, mock::MockTransport};
//!
//! let device = MockTransport::new(Usage::KEYBOARD);
//! let mut keyboard = Keyboard::find([device.clone()], &DeviceConfig::default())?;
//! keyboard.send(&[Keycode::LEFT_CONTROL, Keycode::C])?;
//!
//! assert_eq!(device.sent_reports()[1], vec![0x01, 0, 0x06, 0, 0, 0, 0, 0]);
//! # Ok::<(), hidemu_transport::HidError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod consumer_control;
pub mod consumer_control_code;
pub mod digitizer;
pub mod gamepad;
pub mod keyboard;
pub mod keycode;
pub mod mouse;

pub use config::{ConfigError, DeviceConfig, KeyboardConfig, MouseConfig, OverflowPolicy};
pub use consumer_control::ConsumerControl;
pub use consumer_control_code::ConsumerControlCode;
pub use digitizer::{Digitizer, StylusState};
pub use gamepad::{Gamepad, Joysticks};
pub use keyboard::{Keyboard, LedStatus, MAX_PRESSED_KEYS, Modifiers};
pub use keycode::Keycode;
pub use mouse::{Mouse, MouseButtons};

pub use hidemu_easing::Easing;
pub use hidemu_transport::{HidError, HidResult, HidTransport, ReadinessPolicy, Usage};
