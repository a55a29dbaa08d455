use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use mapnav_core::model::{Coordinate, RouteResult, TransportMode};

use super::{MapnavAppError, NavigatorConfig};
use crate::model::search::SearchOutcome;

/// runs a single search from `origin` and prints the route summary. when
/// `output_file` is given, the route is also written there as GeoJSON.
pub async fn run_search(
    conf: &NavigatorConfig,
    query: &str,
    origin: Coordinate,
    mode: Option<TransportMode>,
    output_file: Option<&Path>,
) -> Result<RouteResult, MapnavAppError> {
    let controller = conf.build_search_controller()?;
    let mode = mode.unwrap_or(conf.default_mode);
    log::info!("searching '{query}' from {origin} by {mode}");
    let route = match controller.search(query, Some(origin), mode).await {
        SearchOutcome::Completed(result) => result?,
        SearchOutcome::EmptyQuery => {
            return Err(MapnavAppError::ConfigurationError(String::from(
                "search query must not be blank",
            )))
        }
        SearchOutcome::Superseded => {
            return Err(MapnavAppError::InternalError(String::from(
                "single search was superseded",
            )))
        }
    };
    println!("{query} ({mode}): {}", route.summary());
    if let Some(path) = output_file {
        let features = route_feature_collection(&route, query, mode);
        std::fs::write(path, serde_json::to_string_pretty(&features)?)?;
        log::info!("wrote route to {path:?}");
    }
    Ok(route)
}

/// the route path and destination marker as GeoJSON features.
pub fn route_feature_collection(
    route: &RouteResult,
    query: &str,
    mode: TransportMode,
) -> FeatureCollection {
    let line = route
        .polyline
        .iter()
        .map(|c| vec![c.longitude, c.latitude])
        .collect::<Vec<_>>();
    let mut path_properties = JsonObject::new();
    path_properties.insert(String::from("mode"), mode.name().into());
    path_properties.insert(
        String::from("distance_meters"),
        route.distance_meters.into(),
    );
    path_properties.insert(
        String::from("travel_time_seconds"),
        route.travel_time_seconds.into(),
    );
    path_properties.insert(String::from("summary"), route.summary().into());

    let mut destination_properties = JsonObject::new();
    destination_properties.insert(String::from("name"), query.into());

    let features = vec![
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(line))),
            id: None,
            properties: Some(path_properties),
            foreign_members: None,
        },
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                route.destination.longitude,
                route.destination.latitude,
            ]))),
            id: None,
            properties: Some(destination_properties),
            foreign_members: None,
        },
    ];
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
