mod camera;
mod camera_config;
mod screen_status;

pub use camera::{CameraController, CameraPosition};
pub use camera_config::CameraConfig;
pub use screen_status::{Marker, MarkerKind, ScreenStatus};
