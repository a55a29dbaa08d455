use std::collections::HashMap;

use async_trait::async_trait;
use mapnav_core::model::{Coordinate, RoutePath, ServiceError, TransportMode};
use mapnav_core::util::geo_utils;
use uom::si::length::meter;

use super::DirectionsProvider;

/// offline directions: a great-circle path between origin and destination with
/// travel time estimated from a fixed average speed per mode. modes without a
/// configured speed have no route.
#[derive(Clone, Debug)]
pub struct StraightLineDirections {
    speeds_kmh: HashMap<TransportMode, f64>,
    max_segment_meters: f64,
}

impl StraightLineDirections {
    pub const DEFAULT_MAX_SEGMENT_METERS: f64 = 250.0;

    pub fn new(speeds_kmh: HashMap<TransportMode, f64>) -> Self {
        Self {
            speeds_kmh,
            max_segment_meters: Self::DEFAULT_MAX_SEGMENT_METERS,
        }
    }

    pub fn default_speeds() -> HashMap<TransportMode, f64> {
        HashMap::from([
            (TransportMode::Driving, 40.0),
            (TransportMode::Walking, 5.0),
            (TransportMode::Transit, 25.0),
            (TransportMode::Cycling, 15.0),
        ])
    }
}

impl Default for StraightLineDirections {
    fn default() -> Self {
        Self::new(Self::default_speeds())
    }
}

#[async_trait]
impl DirectionsProvider for StraightLineDirections {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<Option<RoutePath>, ServiceError> {
        let speed_kmh = match self.speeds_kmh.get(&mode) {
            Some(s) if *s > 0.0 => *s,
            _ => return Ok(None),
        };
        let polyline = geo_utils::densified_path(origin, destination, self.max_segment_meters);
        let distance_meters = geo_utils::polyline_length(&polyline).get::<meter>();
        let travel_time_seconds = distance_meters / (speed_kmh * 1000.0 / 3600.0);
        Ok(Some(RoutePath {
            polyline,
            distance_meters,
            travel_time_seconds,
        }))
    }
}
