//! Network discriminant.

use serde::{Deserialize, Serialize};

/// Distinguishes production from test networks in addresses and genesis settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discrimination {
    Production,
    Test,
}

impl Discrimination {
    /// Wire byte used in genesis config parameters.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Production => 0,
            Self::Test => 1,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Production),
            1 => Some(Self::Test),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}
