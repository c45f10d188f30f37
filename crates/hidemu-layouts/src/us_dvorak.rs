//! US Dvorak.

use crate::layout::KeyboardLayout;

#[rustfmt::skip]
const ASCII_TO_KEYCODE: [u8; 128] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 0x00
    0x2a, 0x2b, 0x28, 0x00, 0x00, 0x00, 0x00, 0x00, // 0x08
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 0x10
    0x00, 0x00, 0x00, 0x29, 0x00, 0x00, 0x00, 0x00, // 0x18
    0x2c, 0x9e, 0x94, 0xa0, 0xa1, 0xa2, 0xa4, 0x14, // 0x20
    0xa6, 0xa7, 0xa5, 0xb0, 0x1a, 0x34, 0x08, 0x2f, // 0x28
    0x27, 0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, // 0x30
    0x25, 0x26, 0x9d, 0x1d, 0x9a, 0x30, 0x88, 0xaf, // 0x38
    0x9f, 0x84, 0x91, 0x8c, 0x8b, 0x87, 0x9c, 0x98, // 0x40
    0x8d, 0x8a, 0x86, 0x99, 0x93, 0x90, 0x8f, 0x96, // 0x48
    0x95, 0x92, 0x9b, 0xb3, 0x8e, 0x89, 0xb7, 0xb6, // 0x50
    0x85, 0x97, 0xb8, 0x2d, 0x31, 0x2e, 0xa3, 0xb4, // 0x58
    0x35, 0x04, 0x11, 0x0c, 0x0b, 0x07, 0x1c, 0x18, // 0x60
    0x0d, 0x0a, 0x06, 0x19, 0x13, 0x10, 0x0f, 0x16, // 0x68
    0x15, 0x1b, 0x12, 0x33, 0x0e, 0x09, 0x37, 0x36, // 0x70
    0x05, 0x17, 0x38, 0xad, 0xb1, 0xae, 0xb5, 0x4c, // 0x78
];

pub static US_DVORAK: KeyboardLayout = KeyboardLayout {
    name: "us-dvorak",
    ascii_to_keycode: ASCII_TO_KEYCODE,
    higher_ascii: &[],
    need_altgr: "",
    combined_keys: &[],
};
