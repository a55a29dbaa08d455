use geo::Rect;
use serde::{Deserialize, Serialize};
use uom::si::f64::{Length, Time};
use uom::si::length::meter;
use uom::si::time::second;

use super::Coordinate;
use crate::util::{format, geo_utils};

/// a path returned by a directions provider, before it is paired with the
/// destination it was computed for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub polyline: Vec<Coordinate>,
    pub distance_meters: f64,
    pub travel_time_seconds: f64,
}

/// the outcome of a successful search. destination and route travel together
/// so a marker is never shown without its matching path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub destination: Coordinate,
    pub polyline: Vec<Coordinate>,
    pub distance_meters: f64,
    pub travel_time_seconds: f64,
}

impl RouteResult {
    pub fn new(destination: Coordinate, path: RoutePath) -> Self {
        let RoutePath {
            polyline,
            distance_meters,
            travel_time_seconds,
        } = path;
        Self {
            destination,
            polyline,
            distance_meters,
            travel_time_seconds,
        }
    }

    pub fn distance(&self) -> Length {
        Length::new::<meter>(self.distance_meters)
    }

    pub fn travel_time(&self) -> Time {
        Time::new::<second>(self.travel_time_seconds)
    }

    /// human-readable "travel time, distance" line, e.g. "18 min, 12.3 km".
    pub fn summary(&self) -> String {
        format!(
            "{}, {}",
            format::format_travel_time(self.travel_time()),
            format::format_distance(self.distance())
        )
    }

    /// extent covering the polyline and the destination marker.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        geo_utils::bounding_rect(self.polyline.iter().chain(std::iter::once(&self.destination)))
    }
}
