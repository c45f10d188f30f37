//! French AZERTY.
//!
//! Circumflex and diaeresis are dead keys on this layout; accented vowels
//! without a key of their own are typed as the dead key followed by the vowel.

use crate::layout::{KeyboardLayout, SHIFT_FLAG};

const CIRCUMFLEX: u16 = 0x2F;
const DIAERESIS: u16 = CIRCUMFLEX | SHIFT_FLAG as u16;

const fn dead(dead_key: u16, base: u8) -> u16 {
    (dead_key << 8) | base as u16
}

#[rustfmt::skip]
const ASCII_TO_KEYCODE: [u8; 128] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 0x00
    0x2a, 0x2b, 0x28, 0x00, 0x00, 0x00, 0x00, 0x00, // 0x08
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 0x10
    0x00, 0x00, 0x00, 0x29, 0x00, 0x00, 0x00, 0x00, // 0x18
    0x2c, 0x38, 0x20, 0x20, 0x30, 0xb4, 0x1e, 0x21, // 0x20
    0x22, 0x2d, 0x32, 0xae, 0x10, 0x23, 0xb6, 0xb7, // 0x28
    0xa7, 0x9e, 0x9f, 0xa0, 0xa1, 0xa2, 0xa3, 0xa4, // 0x30
    0xa5, 0xa6, 0x37, 0x36, 0x64, 0x2e, 0xe4, 0x90, // 0x38
    0x27, 0x94, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, // 0x40
    0x8b, 0x8c, 0x8d, 0x8e, 0x8f, 0xb3, 0x91, 0x92, // 0x48
    0x93, 0x84, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9d, // 0x50
    0x9b, 0x9c, 0x9a, 0x22, 0x25, 0x2d, 0x26, 0x25, // 0x58
    0x24, 0x14, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, // 0x60
    0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x33, 0x11, 0x12, // 0x68
    0x13, 0x04, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1d, // 0x70
    0x1b, 0x1c, 0x1a, 0x21, 0x23, 0x2e, 0x1f, 0x4c, // 0x78
];

pub static FR: KeyboardLayout = KeyboardLayout {
    name: "fr",
    ascii_to_keycode: ASCII_TO_KEYCODE,
    higher_ascii: &[
        ('é', 0x1f),
        ('ç', 0x26),
        ('è', 0x24),
        ('à', 0x27),
        ('€', 0x38),
        ('ù', 0x34),
        ('°', 0x2d | SHIFT_FLAG),
        ('§', 0x38 | SHIFT_FLAG),
        ('µ', 0x31 | SHIFT_FLAG),
    ],
    need_altgr: "~#{[|`\\^@]}€",
    combined_keys: &[
        ('ê', dead(CIRCUMFLEX, b'e')),
        ('Ê', dead(CIRCUMFLEX, b'E')),
        ('ë', dead(DIAERESIS, b'e')),
        ('Ë', dead(DIAERESIS, b'E')),
        ('â', dead(CIRCUMFLEX, b'a')),
        ('Â', dead(CIRCUMFLEX, b'A')),
        ('ä', dead(DIAERESIS, b'a')),
        ('Ä', dead(DIAERESIS, b'A')),
        ('ô', dead(CIRCUMFLEX, b'o')),
        ('Ô', dead(CIRCUMFLEX, b'O')),
        ('ö', dead(DIAERESIS, b'o')),
        ('Ö', dead(DIAERESIS, b'O')),
    ],
};
