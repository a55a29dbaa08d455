use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// travel mode used when requesting directions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Driving,
    Walking,
    Transit,
    Cycling,
}

impl TransportMode {
    /// all modes, in the order they are offered to the user.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Driving,
        TransportMode::Walking,
        TransportMode::Transit,
        TransportMode::Cycling,
    ];

    /// generic directions-provider transport type code for this mode.
    pub fn provider_code(&self) -> &'static str {
        match self {
            TransportMode::Driving => "automobile",
            TransportMode::Walking => "walking",
            TransportMode::Transit => "transit",
            TransportMode::Cycling => "cycling",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Transit => "transit",
            TransportMode::Cycling => "cycling",
        }
    }
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "drive" | "automobile" => Ok(TransportMode::Driving),
            "walking" | "walk" => Ok(TransportMode::Walking),
            "transit" => Ok(TransportMode::Transit),
            "cycling" | "bike" | "bicycle" => Ok(TransportMode::Cycling),
            other => Err(format!(
                "unknown transport mode '{other}', expected one of: driving, walking, transit, cycling"
            )),
        }
    }
}
