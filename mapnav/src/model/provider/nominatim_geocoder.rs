use async_trait::async_trait;
use mapnav_core::model::{Coordinate, ServiceError};
use serde::Deserialize;

use super::Geocoder;
use crate::model::search::SearchQuery;

/// forward geocoding against a Nominatim-compatible `/search` endpoint.
#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub const DEFAULT_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";

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
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<Coordinate>, ServiceError> {
        let url = format!("{}/search", self.base_url);
        log::debug!("geocoding '{query}' via {url}");
        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Request(format!("failure reading response body: {e}")))?;
        decode_search_response(&body)
    }
}

/// reads the first match of a Nominatim search response. coordinates are
/// delivered as decimal strings.
fn decode_search_response(body: &str) -> Result<Option<Coordinate>, ServiceError> {
    let results: Vec<SearchResult> =
        serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    let Some(first) = results.into_iter().next() else {
        return Ok(None);
    };
    let lat = first
        .lat
        .parse::<f64>()
        .map_err(|e| ServiceError::Decode(format!("invalid lat '{}': {e}", first.lat)))?;
    let lon = first
        .lon
        .parse::<f64>()
        .map_err(|e| ServiceError::Decode(format!("invalid lon '{}': {e}", first.lon)))?;
    Coordinate::try_new(lat, lon).map(Some).map_err(ServiceError::Decode)
}

#[cfg(test)]
mod test {
    use mapnav_core::model::{Coordinate, ServiceError};

    use super::decode_search_response;

    #[test]
    fn test_decode_first_match() {
        let body = r#"[
            {"place_id": 1, "lat": "45.4419", "lon": "-73.6128", "display_name": "Collège LaSalle"},
            {"place_id": 2, "lat": "45.0", "lon": "-73.0", "display_name": "elsewhere"}
        ]"#;
        let result = decode_search_response(body).expect("test failed");
        assert_eq!(result, Some(Coordinate::new(45.4419, -73.6128)));
    }

    #[test]
    fn test_decode_empty_is_no_match() {
        let result = decode_search_response("[]").expect("test failed");
        assert_eq!(result, None);
    }

    #[test]
    fn test_decode_garbage() {
        match decode_search_response(r#"{"error": "bad"}"#) {
            Err(ServiceError::Decode(_)) => {}
            other => panic!("expected decode error, found {other:?}"),
        }
        match decode_search_response(r#"[{"lat": "north", "lon": "1.0"}]"#) {
            Err(ServiceError::Decode(msg)) => assert!(msg.contains("north")),
            other => panic!("expected decode error, found {other:?}"),
        }
    }
}
