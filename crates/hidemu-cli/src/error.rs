//! Error types for the hidemu CLI

use hidemu_devices::ConfigError;
use hidemu_transport::HidError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Unsupported character: {0}")]
    UnsupportedCharacter(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Device error: {0}")]
    Device(HidError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::DeviceNotFound(_) => 2,
            CliError::UnsupportedCharacter(_) => 3,
            CliError::ValidationError(_) | CliError::InvalidConfiguration(_) => 4,
            CliError::Device(_) | CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }

    pub fn validation(error: impl std::fmt::Display) -> Self {
        CliError::ValidationError(error.to_string())
    }
}

impl From<HidError> for CliError {
    fn from(error: HidError) -> Self {
        match error {
            HidError::DeviceNotFound { .. } => CliError::DeviceNotFound(error.to_string()),
            HidError::UnsupportedCharacter { .. } => {
                CliError::UnsupportedCharacter(error.to_string())
            }
            HidError::OutOfRange { .. } | HidError::Capacity { .. } => {
                CliError::ValidationError(error.to_string())
            }
            other => CliError::Device(other),
        }
    }
}
