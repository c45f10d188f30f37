//! Mouse commands

use std::time::Duration;

use hidemu_devices::Easing;
use tracing::info;

use crate::commands::{ButtonArg, MouseCommands, Session};
use crate::error::CliError;

/// Execute mouse command
pub fn execute(session: &Session, cmd: &MouseCommands) -> Result<(), CliError> {
    match cmd {
        MouseCommands::Move {
            x,
            y,
            wheel,
            duration_ms,
            easing,
        } => move_pointer(session, (*x, *y, *wheel), Duration::from_millis(*duration_ms), easing),
        MouseCommands::Click { button } => click(session, *button),
    }
}

fn move_pointer(
    session: &Session,
    (x, y, wheel): (i32, i32, i32),
    duration: Duration,
    easing: &str,
) -> Result<(), CliError> {
    let easing: Easing = easing.parse().map_err(CliError::validation)?;
    let mut mouse = session.mouse()?;
    if duration.is_zero() {
        mouse.move_by(x, y, wheel)?;
    } else {
        mouse.move_eased(x, y, wheel, duration, easing)?;
    }
    info!("Moved pointer by ({x}, {y}), wheel {wheel}");
    Ok(())
}

fn click(session: &Session, button: ButtonArg) -> Result<(), CliError> {
    let mut mouse = session.mouse()?;
    mouse.click(button.into())?;
    info!("Clicked {button:?}");
    Ok(())
}
