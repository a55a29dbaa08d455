use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// camera distance from the map, in meters, before any zooming
    pub initial_zoom_meters: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_zoom_meters: 2000.0,
            zoom_in_factor: 0.8,
            zoom_out_factor: 1.2,
        }
    }
}
