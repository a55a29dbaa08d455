use std::collections::HashMap;

use async_trait::async_trait;
use mapnav_core::model::{Coordinate, ServiceError};

use super::Geocoder;
use crate::model::search::SearchQuery;

/// offline geocoder backed by a fixed table of named places.
/// lookups ignore case and surrounding whitespace.
#[derive(Clone, Debug, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinate>,
}

impl StaticGeocoder {
    pub fn new<I, S>(places: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinate)>,
        S: AsRef<str>,
    {
        let places = places
            .into_iter()
            .map(|(name, coord)| (normalize(name.as_ref()), coord))
            .collect();
        Self { places }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<Coordinate>, ServiceError> {
        Ok(self.places.get(&normalize(query.as_str())).copied())
    }
}
