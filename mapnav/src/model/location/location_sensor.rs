use mapnav_core::model::{AuthorizationState, Coordinate};

/// events pushed by a location sensor. they are delivered over a channel and
/// applied by [super::LocationSession::run] in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    Position(Coordinate),
    Authorization(AuthorizationState),
    Error(SensorError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    #[error("location unavailable: {0}")]
    Unavailable(String),
    #[error("failure reading location track: {0}")]
    Track(String),
}

/// commands accepted by a device location sensor. results of these commands
/// (new authorization, positions, failures) arrive later as [SensorEvent]s.
pub trait LocationSensor: Send {
    /// current permission state, as known to the sensor.
    fn authorization(&self) -> AuthorizationState;

    /// prompt the user for location permission.
    fn request_permission(&mut self);

    fn start_updates(&mut self);

    fn stop_updates(&mut self);
}
