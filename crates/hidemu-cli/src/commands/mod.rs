//! Command implementations for the hidemu CLI

pub mod consumer;
pub mod keyboard;
pub mod mouse;

use clap::{Subcommand, ValueEnum};
use hidemu_devices::{ConsumerControl, DeviceConfig, Keyboard, Mouse, MouseButtons};
use hidemu_layouts::{KeyboardLayout, LayoutId};
use hidemu_transport::HidTransport;

use crate::backend::Backend;
use crate::error::CliError;

pub type Transport = Box<dyn HidTransport>;

/// Resolved configuration plus the backend that provides transports.
#[derive(Debug)]
pub struct Session {
    pub config: DeviceConfig,
    pub backend: Backend,
}

impl Session {
    pub fn keyboard(&self) -> Result<Keyboard<Transport>, CliError> {
        Ok(Keyboard::find(self.backend.candidates(), &self.config)?)
    }

    pub fn mouse(&self) -> Result<Mouse<Transport>, CliError> {
        Ok(Mouse::find(self.backend.candidates(), &self.config)?)
    }

    pub fn consumer_control(&self) -> Result<ConsumerControl<Transport>, CliError> {
        Ok(ConsumerControl::find(self.backend.candidates(), &self.config)?)
    }

    /// `name` if given, otherwise the configured layout.
    pub fn layout(&self, name: Option<&str>) -> Result<&'static KeyboardLayout, CliError> {
        let name = name.unwrap_or(&self.config.layout);
        let id: LayoutId = name.parse().map_err(CliError::validation)?;
        Ok(id.layout())
    }
}

#[derive(Subcommand, Debug)]
pub enum MouseCommands {
    /// Move the pointer by a relative amount
    Move {
        /// Horizontal distance (positive is right)
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Vertical distance (positive is down)
        #[arg(allow_negative_numbers = true)]
        y: i32,
        /// Wheel clicks (positive is up)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        wheel: i32,
        /// Spread the move over this many milliseconds
        #[arg(long, default_value_t = 0)]
        duration_ms: u64,
        /// Easing curve for timed moves (linear, ease-in, ease-out, ease-in-out,
        /// exponential:N, logarithmic:N, bezier:x1,y1,x2,y2)
        #[arg(long, default_value = "linear")]
        easing: String,
    },

    /// Press and release a mouse button
    Click {
        #[arg(value_enum, default_value_t = ButtonArg::Left)]
        button: ButtonArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ButtonArg {
    Left,
    Right,
    Middle,
}

impl From<ButtonArg> for MouseButtons {
    fn from(button: ButtonArg) -> Self {
        match button {
            ButtonArg::Left => MouseButtons::LEFT,
            ButtonArg::Right => MouseButtons::RIGHT,
            ButtonArg::Middle => MouseButtons::MIDDLE,
        }
    }
}
