mod directions_provider;
mod geocoder;
mod nominatim_geocoder;
mod osrm_directions;
mod provider_config;
mod static_geocoder;
mod straight_line_directions;

pub use directions_provider::DirectionsProvider;
pub use geocoder::Geocoder;
pub use nominatim_geocoder::NominatimGeocoder;
pub use osrm_directions::OsrmDirections;
pub use provider_config::{
    DirectionsConfig, GeocoderConfig, DEFAULT_USER_AGENT, LANDMARK, LANDMARK_NAME,
};
pub use static_geocoder::StaticGeocoder;
pub use straight_line_directions::StraightLineDirections;
