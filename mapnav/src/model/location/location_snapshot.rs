use chrono::{DateTime, Utc};
use mapnav_core::model::{AuthorizationState, Coordinate};

/// the observable state of a [super::LocationSession].
///
/// `coordinate` is None until the first accepted position update and is
/// never cleared afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationSnapshot {
    pub coordinate: Option<Coordinate>,
    pub authorization: AuthorizationState,
    /// true while the sensor is delivering position updates
    pub receiving: bool,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}
