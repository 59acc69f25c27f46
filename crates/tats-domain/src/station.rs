//! Station domain types shared between services and the backend wire format.

use serde::{Deserialize, Serialize};

/// How a station's dispensing points are addressed.
///
/// Wire format follows the backend: `"pumpAddress"` when nozzles are reached
/// through their pump's bus address, `"nozzle"` when each nozzle carries its
/// own identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NozzleIdentifier {
    PumpAddress,
    Nozzle,
}

impl NozzleIdentifier {
    /// Parse the backend wire value. Returns `None` for unknown modes.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pumpAddress" => Some(Self::PumpAddress),
            "nozzle" => Some(Self::Nozzle),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PumpAddress => "pumpAddress",
            Self::Nozzle => "nozzle",
        }
    }
}
