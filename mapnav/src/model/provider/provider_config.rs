use std::{collections::HashMap, sync::Arc};

use mapnav_core::model::{Coordinate, TransportMode};
use serde::{Deserialize, Serialize};

use super::{
    DirectionsProvider, Geocoder, NominatimGeocoder, OsrmDirections, StaticGeocoder,
    StraightLineDirections,
};

pub const DEFAULT_USER_AGENT: &str = concat!("mapnav/", env!("CARGO_PKG_VERSION"));

/// landmark shown on the map and resolvable by the offline geocoder.
pub const LANDMARK_NAME: &str = "Collège LaSalle";
pub const LANDMARK: Coordinate = Coordinate::new(45.4919, -73.5794);

/// selects and configures the geocoding collaborator.
/// [geocoder]
/// type = "nominatim"
/// base_url = "https://nominatim.openstreetmap.org"
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeocoderConfig {
    Nominatim {
        #[serde(default = "default_nominatim_url")]
        base_url: String,
        #[serde(default = "default_user_agent")]
        user_agent: String,
    },
    /// named places as `name = [latitude, longitude]`
    Static { places: HashMap<String, [f64; 2]> },
}

/// selects and configures the directions collaborator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectionsConfig {
    Osrm {
        #[serde(default = "default_osrm_url")]
        base_url: String,
        #[serde(default = "default_user_agent")]
        user_agent: String,
    },
    StraightLine {
        #[serde(default = "StraightLineDirections::default_speeds")]
        speeds_kmh: HashMap<TransportMode, f64>,
    },
}

fn default_nominatim_url() -> String {
    String::from(NominatimGeocoder::DEFAULT_BASE_URL)
}

fn default_osrm_url() -> String {
    String::from(OsrmDirections::DEFAULT_BASE_URL)
}

fn default_user_agent() -> String {
    String::from(DEFAULT_USER_AGENT)
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        GeocoderConfig::Static {
            places: HashMap::from([(
                String::from(LANDMARK_NAME),
                [LANDMARK.latitude, LANDMARK.longitude],
            )]),
        }
    }
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        DirectionsConfig::StraightLine {
            speeds_kmh: StraightLineDirections::default_speeds(),
        }
    }
}

impl GeocoderConfig {
    pub fn build(&self) -> Result<Arc<dyn Geocoder>, String> {
        match self {
            GeocoderConfig::Nominatim {
                base_url,
                user_agent,
            } => {
                let geocoder = NominatimGeocoder::new(base_url, user_agent)
                    .map_err(|e| format!("failure building nominatim geocoder: {e}"))?;
                Ok(Arc::new(geocoder))
            }
            GeocoderConfig::Static { places } => {
                let entries = places
                    .iter()
                    .map(|(name, [lat, lon])| {
                        Coordinate::try_new(*lat, *lon)
                            .map(|c| (name.clone(), c))
                            .map_err(|e| format!("invalid place '{name}': {e}"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let geocoder = StaticGeocoder::new(entries);
                if geocoder.is_empty() {
                    return Err(String::from("static geocoder needs at least one place"));
                }
                log::debug!("static geocoder with {} places", geocoder.len());
                Ok(Arc::new(geocoder))
            }
        }
    }
}

impl DirectionsConfig {
    pub fn build(&self) -> Result<Arc<dyn DirectionsProvider>, String> {
        match self {
            DirectionsConfig::Osrm {
                base_url,
                user_agent,
            } => {
                let directions = OsrmDirections::new(base_url, user_agent)
                    .map_err(|e| format!("failure building osrm directions: {e}"))?;
                Ok(Arc::new(directions))
            }
            DirectionsConfig::StraightLine { speeds_kmh } => {
                if let Some((mode, speed)) = speeds_kmh.iter().find(|(_, s)| !(**s > 0.0)) {
                    return Err(format!("speed for {mode} must be positive, found {speed}"));
                }
                Ok(Arc::new(StraightLineDirections::new(speeds_kmh.clone())))
            }
        }
    }
}
