//! HID usage identifiers for the device classes

use serde::{Deserialize, Serialize};

/// A `(usage_page, usage)` pair identifying a top-level HID collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Usage {
    pub page: u16,
    pub id: u16,
}

impl Usage {
    pub const KEYBOARD: Usage = Usage::new(0x01, 0x06);
    pub const MOUSE: Usage = Usage::new(0x01, 0x02);
    pub const GAMEPAD: Usage = Usage::new(0x01, 0x05);
    pub const CONSUMER_CONTROL: Usage = Usage::new(0x0C, 0x01);
    pub const DIGITIZER: Usage = Usage::new(0x0D, 0x02);

    pub const fn new(page: u16, id: u16) -> Self {
        Self { page, id }
    }

    pub fn matches(&self, usage_page: u16, usage: u16) -> bool {
        self.page == usage_page && self.id == usage
    }

    pub fn display_name(&self) -> String {
        match *self {
            Usage::KEYBOARD => "keyboard".to_string(),
            Usage::MOUSE => "mouse".to_string(),
            Usage::GAMEPAD => "gamepad".to_string(),
            Usage::CONSUMER_CONTROL => "consumer control".to_string(),
            Usage::DIGITIZER => "digitizer".to_string(),
            _ => format!("{:04x}:{:04x}", self.page, self.id),
        }
    }
}
