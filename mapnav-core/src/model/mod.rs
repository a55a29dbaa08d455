mod authorization_state;
mod coordinate;
mod route_result;
mod service_error;
mod transport_mode;

pub use authorization_state::AuthorizationState;
pub use coordinate::Coordinate;
pub use route_result::{RoutePath, RouteResult};
pub use service_error::ServiceError;
pub use transport_mode::TransportMode;
