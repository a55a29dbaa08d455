use async_trait::async_trait;
use mapnav_core::model::{Coordinate, RoutePath, ServiceError, TransportMode};

/// computes a path and travel estimates between two coordinates for a transport mode.
///
/// `Ok(None)` means the service answered but no route exists for this request.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<Option<RoutePath>, ServiceError>;
}
