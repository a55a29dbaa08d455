use async_trait::async_trait;
use mapnav_core::model::{Coordinate, RoutePath, ServiceError, TransportMode};
use serde::Deserialize;

use super::DirectionsProvider;

/// directions from an OSRM-compatible `/route/v1` endpoint.
#[derive(Clone, Debug)]
pub struct OsrmDirections {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct RouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    /// meters
    distance: f64,
    /// seconds
    duration: f64,
    geometry: geojson::Geometry,
}

impl OsrmDirections {
    pub const DEFAULT_BASE_URL: &'static str = "https://router.project-osrm.org";

    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ServiceError::Request(format!("failure building http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// OSRM routing profile for a transport mode. OSRM has no transit profile.
    pub fn profile(mode: TransportMode) -> Option<&'static str> {
        match mode {
            TransportMode::Driving => Some("driving"),
            TransportMode::Walking => Some("foot"),
            TransportMode::Cycling => Some("bike"),
            TransportMode::Transit => None,
        }
    }
}

#[async_trait]
impl DirectionsProvider for OsrmDirections {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<Option<RoutePath>, ServiceError> {
        let Some(profile) = Self::profile(mode) else {
            log::debug!("osrm has no profile for {mode}, reporting no route");
            return Ok(None);
        };
        let url = format!(
            "{}/route/v1/{profile}/{},{};{},{}",
            self.base_url,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );
        log::debug!("requesting {mode} route via {url}");
        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        // OSRM reports unroutable input as 400 with a json body carrying the code
        let status = response.status();
        if !status.is_success() && status != reqwest::StatusCode::BAD_REQUEST {
            return Err(ServiceError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Request(format!("failure reading response body: {e}")))?;
        decode_route_response(&body)
    }
}

fn decode_route_response(body: &str) -> Result<Option<RoutePath>, ServiceError> {
    let response: RouteResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Ok(None),
        code => {
            let message = response.message.unwrap_or_default();
            return Err(ServiceError::Request(format!("{code}: {message}")));
        }
    }
    let Some(route) = response.routes.into_iter().next() else {
        return Ok(None);
    };
    let polyline = match route.geometry.value {
        geojson::Value::LineString(positions) => positions
            .iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] => Ok(Coordinate::new(*lat, *lon)),
                _ => Err(ServiceError::Decode(format!(
                    "route position has {} components, expected at least 2",
                    position.len()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(ServiceError::Decode(format!(
                "expected LineString route geometry, found {other:?}"
            )))
        }
    };
    Ok(Some(RoutePath {
        polyline,
        distance_meters: route.distance,
        travel_time_seconds: route.duration,
    }))
}
