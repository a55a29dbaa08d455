use std::{path::Path, time::Duration};

use config::{Config, Environment, FileFormat};
use mapnav_core::model::TransportMode;
use serde::{Deserialize, Serialize};

use super::MapnavAppError;
use crate::model::{
    location::SensorConfig,
    provider::{DirectionsConfig, GeocoderConfig},
    search::RouteSearchController,
    view::CameraConfig,
};

/// prefix of environment variables overriding the configuration file, for
/// example `MAPNAV_SEARCH_TIMEOUT_SECS=5` or `MAPNAV_SENSOR__GRANT_PERMISSION=false`.
pub const ENV_PREFIX: &str = "MAPNAV";

/// run configuration of the navigator. every section is optional.
///
/// ```toml
/// search_timeout_secs = 15.0
/// default_mode = "driving"
///
/// [geocoder]
/// type = "nominatim"
///
/// [directions]
/// type = "osrm"
///
/// [sensor]
/// track_file = "track.csv"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigatorConfig {
    /// limit on each geocoding or routing call
    pub search_timeout_secs: f64,
    pub default_mode: TransportMode,
    pub camera: CameraConfig,
    pub geocoder: GeocoderConfig,
    pub directions: DirectionsConfig,
    pub sensor: SensorConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            search_timeout_secs: RouteSearchController::DEFAULT_TIMEOUT.as_secs_f64(),
            default_mode: TransportMode::default(),
            camera: CameraConfig::default(),
            geocoder: GeocoderConfig::default(),
            directions: DirectionsConfig::default(),
            sensor: SensorConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// reads the optional TOML file, then applies `MAPNAV_` environment overrides.
    pub fn load(filepath: Option<&str>) -> Result<Self, MapnavAppError> {
        Self::from_sources(filepath, default_environment())
    }

    pub fn from_sources(
        filepath: Option<&str>,
        environment: Environment,
    ) -> Result<Self, MapnavAppError> {
        let mut builder = Config::builder();
        if let Some(f) = filepath {
            log::info!("reading mapnav configuration from {f}");
            builder = builder.add_source(config::File::new(f, FileFormat::Toml));
        }
        let config = builder
            .add_source(environment)
            .build()
            .map_err(|e| MapnavAppError::ConfigReadError {
                msg: format!("failed reading '{}'", filepath.unwrap_or("environment")),
                source: e,
            })?;
        let conf = config
            .try_deserialize::<NavigatorConfig>()
            .map_err(|e| MapnavAppError::ConfigReadError {
                msg: String::from("failed decoding mapnav configuration"),
                source: e,
            })?;
        conf.search_timeout()?;
        Ok(conf)
    }

    pub fn search_timeout(&self) -> Result<Duration, MapnavAppError> {
        if !(self.search_timeout_secs > 0.0) {
            return Err(MapnavAppError::ConfigurationError(format!(
                "search_timeout_secs must be positive, found {}",
                self.search_timeout_secs
            )));
        }
        Duration::try_from_secs_f64(self.search_timeout_secs).map_err(|e| {
            MapnavAppError::ConfigurationError(format!("invalid search_timeout_secs: {e}"))
        })
    }

    /// builds the search controller with the configured collaborators.
    pub fn build_search_controller(&self) -> Result<RouteSearchController, MapnavAppError> {
        let geocoder = self
            .geocoder
            .build()
            .map_err(MapnavAppError::ConfigurationError)?;
        let directions = self
            .directions
            .build()
            .map_err(MapnavAppError::ConfigurationError)?;
        let controller = RouteSearchController::new(geocoder, directions, self.default_mode)
            .with_timeout(self.search_timeout()?);
        Ok(controller)
    }

    pub fn to_toml(&self) -> Result<String, MapnavAppError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl TryFrom<&Path> for NavigatorConfig {
    type Error = MapnavAppError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let f = path.to_str().ok_or_else(|| {
            MapnavAppError::ConfigurationError(format!("path {path:?} is not valid UTF-8"))
        })?;
        Self::load(Some(f))
    }
}

fn default_environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
