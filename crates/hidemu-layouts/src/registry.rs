//! Layout selection by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::KeyboardLayout;
use crate::{FR, US, US_DVORAK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutId {
    #[default]
    Us,
    UsDvorak,
    Fr,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown keyboard layout '{0}' (expected one of: us, us-dvorak, fr)")]
pub struct UnknownLayout(pub String);

impl LayoutId {
    pub const ALL: [LayoutId; 3] = [LayoutId::Us, LayoutId::UsDvorak, LayoutId::Fr];

    pub fn layout(self) -> &'static KeyboardLayout {
        match self {
            LayoutId::Us => &US,
            LayoutId::UsDvorak => &US_DVORAK,
            LayoutId::Fr => &FR,
        }
    }

    pub fn name(self) -> &'static str {
        self.layout().name
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutId {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "us" | "en-us" => Ok(LayoutId::Us),
            "us-dvorak" | "dvorak" => Ok(LayoutId::UsDvorak),
            "fr" | "azerty" => Ok(LayoutId::Fr),
            _ => Err(UnknownLayout(s.to_string())),
        }
    }
}
