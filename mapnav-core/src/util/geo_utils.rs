use geo::{
    line_measures::Densifiable, BoundingRect, Haversine, Length, LineString,
    MultiPoint, Point, Rect,
};

use crate::model::Coordinate;

/// haversine length of a polyline. empty and single-point polylines have zero length.
pub fn polyline_length(polyline: &[Coordinate]) -> uom::si::f64::Length {
    let line = to_linestring(polyline);
    uom::si::f64::Length::new::<uom::si::length::meter>(Haversine.length(&line))
}

/// builds a great-circle polyline between two coordinates with no segment
/// longer than `max_segment_meters`. the result always starts at `src` and ends at `dst`.
pub fn densified_path(src: Coordinate, dst: Coordinate, max_segment_meters: f64) -> Vec<Coordinate> {
    let line = to_linestring(&[src, dst]);
    if max_segment_meters <= 0.0 || !max_segment_meters.is_finite() {
        return vec![src, dst];
    }
    line.densify(&Haversine, max_segment_meters)
        .into_points()
        .into_iter()
        .map(Coordinate::from)
        .collect()
}

/// the smallest rectangle containing every coordinate, or None when there are none.
pub fn bounding_rect<'a, I>(coordinates: I) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    let points: MultiPoint<f64> = coordinates
        .into_iter()
        .map(|c| Point::<f64>::from(*c))
        .collect::<Vec<_>>()
        .into();
    points.bounding_rect()
}

fn to_linestring(polyline: &[Coordinate]) -> LineString<f64> {
    polyline
        .iter()
        .map(|c| Point::<f64>::from(*c).0)
        .collect::<Vec<_>>()
        .into()
}
