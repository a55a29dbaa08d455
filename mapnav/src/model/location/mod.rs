mod location_sensor;
mod location_session;
mod location_snapshot;
mod replay_sensor;
mod sensor_config;

pub use location_sensor::{LocationSensor, SensorError, SensorEvent};
pub use location_session::LocationSession;
pub use location_snapshot::LocationSnapshot;
pub use replay_sensor::{read_track, ReplaySensor};
pub use sensor_config::SensorConfig;
