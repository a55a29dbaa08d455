use async_trait::async_trait;
use mapnav_core::model::{Coordinate, ServiceError};

use crate::model::search::SearchQuery;

/// resolves free text to a coordinate.
///
/// `Ok(None)` means the service answered but found no match. when the service
/// finds several candidates, the first is used.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<Coordinate>, ServiceError>;
}
