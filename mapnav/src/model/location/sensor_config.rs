use serde::{Deserialize, Serialize};

/// configures the simulated location sensor used by the command line app.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SensorConfig {
    /// CSV file with `latitude,longitude` rows to replay
    pub track_file: Option<String>,
    /// fixed position reported when no track file is given
    pub position: [f64; 2],
    pub interval_millis: u64,
    /// answer to the permission prompt
    pub grant_permission: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            track_file: None,
            position: [45.5017, -73.5673],
            interval_millis: 1000,
            grant_permission: true,
        }
    }
}
