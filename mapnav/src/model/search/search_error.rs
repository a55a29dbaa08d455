use mapnav_core::model::ServiceError;

/// recoverable, user-facing failures of a destination search. the display
/// string of each variant is the message shown to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("User location is not available yet")]
    LocationUnavailable,
    #[error("No result found for query: {0}")]
    NoGeocodingMatch(String),
    #[error("Place search failed: {0}")]
    GeocodingServiceError(ServiceError),
    #[error("No route found.")]
    NoRouteFound,
    #[error("Route calculation failed: {0}")]
    RoutingServiceError(ServiceError),
}
