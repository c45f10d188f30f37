//! Keyboard commands: typing text, looking up keycodes, tapping chords

use std::time::Duration;

use hidemu_devices::Keycode;
use tracing::info;

use crate::commands::Session;
use crate::error::CliError;
use crate::output;

/// Type `text` with the selected layout
pub fn type_text(
    session: &Session,
    text: &str,
    layout: Option<&str>,
    delay: Duration,
    newline: bool,
) -> Result<(), CliError> {
    let layout = session.layout(layout)?;
    // Reject untypeable text before the keyboard is bound.
    for character in text.chars() {
        layout.keystrokes(character)?;
    }

    let mut keyboard = session.keyboard()?;
    if newline {
        layout.writeln(&mut keyboard, text, delay)?;
    } else {
        layout.write(&mut keyboard, text, delay)?;
    }
    info!("Typed {} characters using layout {}", text.chars().count(), layout.name);
    Ok(())
}

/// Show the keys that type one character
pub fn keycodes(
    session: &Session,
    character: &str,
    layout: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let mut chars = character.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(CliError::validation(format!(
            "expected exactly one character, got {character:?}"
        )));
    };

    let layout = session.layout(layout)?;
    let strokes = layout.keystrokes(c)?;
    output::print_keystrokes(c, layout, &strokes, json)?;
    Ok(())
}

/// Press the named keys together, then release them
pub fn key(session: &Session, names: &[String]) -> Result<(), CliError> {
    let keycodes = names
        .iter()
        .map(|name| name.parse::<Keycode>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(CliError::validation)?;

    let mut keyboard = session.keyboard()?;
    keyboard.send(&keycodes)?;
    info!("Tapped {keycodes:?}");
    Ok(())
}
