use std::fmt;

use serde::{Serialize, Serializer};

/// Risk classification attached to a computed ratio.
///
/// Serialized as its integer code: RED=0, GREEN=1, AMBER=2, MEDIUM_RISK=3, WHITE=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Red,
    Green,
    Amber,
    /// Display only; no rule produces it.
    MediumRisk,
    /// Reserved for missing data; no rule produces it.
    White,
}

impl Flag {
    pub fn code(self) -> u8 {
        match self {
            Flag::Red => 0,
            Flag::Green => 1,
            Flag::Amber => 2,
            Flag::MediumRisk => 3,
            Flag::White => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Flag::Red => "RED",
            Flag::Green => "GREEN",
            Flag::Amber => "AMBER",
            Flag::MediumRisk => "MEDIUM_RISK",
            Flag::White => "WHITE",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
