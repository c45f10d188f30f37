//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use hidemu_layouts::{KeyboardLayout, Keystroke};
use serde_json::json;

/// Space-separated lowercase hex, e.g. `02 00 04`.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {error}", "Error:".red().bold());

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {err}", "Caused by:".yellow());
        source = err.source();
    }
}

fn chord_names(stroke: &Keystroke) -> Vec<String> {
    stroke.keycodes().iter().map(ToString::to_string).collect()
}

/// Print the chords that type `character`, one per line.
pub fn print_keystrokes(
    character: char,
    layout: &KeyboardLayout,
    strokes: &[Keystroke],
    json: bool,
) -> serde_json::Result<()> {
    if json {
        let chords: Vec<_> = strokes
            .iter()
            .map(|stroke| {
                json!({
                    "names": chord_names(stroke),
                    "codes": stroke.keycodes().iter().map(|k| k.code()).collect::<Vec<_>>(),
                })
            })
            .collect();
        let output = json!({
            "success": true,
            "character": character.to_string(),
            "layout": layout.name,
            "chords": chords,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for stroke in strokes {
            println!("{}", chord_names(stroke).join(" + "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[0x02, 0x00, 0xcd]), "02 00 cd");
        assert_eq!(hex(&[]), "");
    }
}
