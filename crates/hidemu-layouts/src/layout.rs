//! Locale-agnostic text to keystroke translation.
//!
//! A [`KeyboardLayout`] is pure static data. Each table byte is a HID keycode
//! with [`SHIFT_FLAG`] set when Shift must be held; zero means the character
//! has no key of its own. Characters that need a dead key are stored in
//! `combined_keys` as `0bSDDD_DDDD_AKKK_KKKK`:
//!
//! * `S`: Shift is held for the dead key
//! * `D`: keycode of the dead key
//! * `A`: AltGr is held for the dead key
//! * `K`: ASCII code of the character typed after the dead key

use std::thread;
use std::time::Duration;

use hidemu_devices::{Keyboard, Keycode, Modifiers};
use hidemu_transport::{HidError, HidResult, HidTransport};
use tracing::{debug, trace};

/// Set in a table byte when Shift is required.
pub const SHIFT_FLAG: u8 = 0x80;

/// Set in the low byte of a combined key when the dead key needs AltGr.
pub const ALTGR_FLAG: u8 = 0x80;

/// Static keycode tables for one keyboard locale.
#[derive(Debug)]
pub struct KeyboardLayout {
    pub name: &'static str,
    /// Indexed by code point for U+0000 to U+007F.
    pub ascii_to_keycode: [u8; 128],
    /// Code points above U+007F that have their own key.
    pub higher_ascii: &'static [(char, u8)],
    /// Characters typed with AltGr held.
    pub need_altgr: &'static str,
    /// Characters typed as a dead key followed by a base character.
    pub combined_keys: &'static [(char, u16)],
}

/// One chord: the modifiers to hold while `keycode` is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub modifiers: Modifiers,
    pub keycode: Keycode,
}

impl Keystroke {
    fn decode(encoded: u8, altgr: bool) -> Self {
        let mut modifiers = Modifiers::empty();
        if altgr {
            modifiers |= Modifiers::RIGHT_ALT;
        }
        if encoded & SHIFT_FLAG != 0 {
            modifiers |= Modifiers::LEFT_SHIFT;
        }
        Self {
            modifiers,
            keycode: Keycode(encoded & !SHIFT_FLAG),
        }
    }

    /// Keycodes in press order: AltGr, Shift, then the key.
    pub fn keycodes(&self) -> Vec<Keycode> {
        let mut codes = Vec::with_capacity(3);
        if self.modifiers.contains(Modifiers::RIGHT_ALT) {
            codes.push(Keycode::RIGHT_ALT);
        }
        if self.modifiers.contains(Modifiers::LEFT_SHIFT) {
            codes.push(Keycode::LEFT_SHIFT);
        }
        codes.push(self.keycode);
        codes
    }

    /// Hold each keycode in turn, one report per press, then release everything.
    fn type_on<T: HidTransport>(&self, keyboard: &mut Keyboard<T>) -> HidResult<()> {
        for keycode in self.keycodes() {
            keyboard.press(&[keycode])?;
        }
        keyboard.release_all()
    }
}

impl KeyboardLayout {
    /// Table byte for `character`, or zero when it has no key of its own.
    fn encoded(&self, character: char) -> u8 {
        let index = usize::try_from(u32::from(character)).unwrap_or(usize::MAX);
        match self.ascii_to_keycode.get(index) {
            Some(&encoded) => encoded,
            None => self
                .higher_ascii
                .iter()
                .find(|(c, _)| *c == character)
                .map_or(0, |&(_, encoded)| encoded),
        }
    }

    fn combined(&self, character: char) -> Option<u16> {
        self.combined_keys
            .iter()
            .find(|(c, _)| *c == character)
            .map(|&(_, packed)| packed)
    }

    /// The chords that type `character`: one for a direct key, two for a
    /// dead-key composition.
    ///
    /// # Errors
    ///
    /// [`HidError::UnsupportedCharacter`] when the layout cannot type it.
    pub fn keystrokes(&self, character: char) -> HidResult<Vec<Keystroke>> {
        let encoded = self.encoded(character);
        if encoded != 0 {
            let altgr = self.need_altgr.contains(character);
            return Ok(vec![Keystroke::decode(encoded, altgr)]);
        }

        let unsupported = HidError::UnsupportedCharacter { character };
        let [dead, base] = self.combined(character).ok_or(unsupported.clone())?.to_be_bytes();
        let base_encoded = self.encoded(char::from(base & !ALTGR_FLAG));
        if base_encoded == 0 {
            return Err(unsupported);
        }
        Ok(vec![
            Keystroke::decode(dead, base & ALTGR_FLAG != 0),
            Keystroke::decode(base_encoded, false),
        ])
    }

    /// Keycodes pressed together to type `character`.
    ///
    /// # Errors
    ///
    /// [`HidError::UnsupportedCharacter`] when the character has no key or
    /// needs a dead-key composition, which cannot be expressed as one chord.
    pub fn keycodes(&self, character: char) -> HidResult<Vec<Keycode>> {
        match self.keystrokes(character)?.as_slice() {
            [stroke] => Ok(stroke.keycodes()),
            _ => Err(HidError::UnsupportedCharacter { character }),
        }
    }

    pub fn supports(&self, character: char) -> bool {
        self.keystrokes(character).is_ok()
    }

    /// Type `text` on `keyboard`, waiting `delay` after each character.
    ///
    /// The whole string is translated before the first key goes down, so an
    /// untypeable character anywhere in `text` fails without sending anything.
    ///
    /// # Errors
    ///
    /// [`HidError::UnsupportedCharacter`] for the first untypeable character;
    /// transport errors from the keyboard.
    pub fn write<T: HidTransport>(
        &self,
        keyboard: &mut Keyboard<T>,
        text: &str,
        delay: Duration,
    ) -> HidResult<()> {
        let plan = text
            .chars()
            .map(|character| self.keystrokes(character))
            .collect::<HidResult<Vec<_>>>()?;
        debug!("Typing {} characters with layout {}", plan.len(), self.name);

        for strokes in plan {
            for stroke in &strokes {
                trace!("Keystroke {stroke:?}");
                stroke.type_on(keyboard)?;
            }
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        Ok(())
    }

    /// [`KeyboardLayout::write`] followed by Enter.
    ///
    /// # Errors
    ///
    /// Same as [`KeyboardLayout::write`].
    pub fn writeln<T: HidTransport>(
        &self,
        keyboard: &mut Keyboard<T>,
        text: &str,
        delay: Duration,
    ) -> HidResult<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write(keyboard, &line, delay)
    }
}
