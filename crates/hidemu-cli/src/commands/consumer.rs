//! Consumer control (media key) command

use hidemu_devices::ConsumerControlCode;
use tracing::info;

use crate::commands::Session;
use crate::error::CliError;

/// Tap one consumer control code, by name or as `0xNNNN`
pub fn execute(session: &Session, code: &str) -> Result<(), CliError> {
    let code: ConsumerControlCode = code.parse().map_err(CliError::validation)?;
    let mut consumer = session.consumer_control()?;
    consumer.send(code)?;
    info!("Sent consumer control {code}");
    Ok(())
}
