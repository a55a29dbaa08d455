use std::fmt::Display;

use mapnav_core::model::{Coordinate, TransportMode};
use serde::Serialize;

use crate::model::location::LocationSnapshot;
use crate::model::provider::{LANDMARK, LANDMARK_NAME};
use crate::model::search::SearchSnapshot;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Landmark,
    User,
    Destination,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub coordinate: Coordinate,
    pub kind: MarkerKind,
}

impl Marker {
    fn new(label: &str, coordinate: Coordinate, kind: MarkerKind) -> Self {
        Self {
            label: label.to_string(),
            coordinate,
            kind,
        }
    }
}

/// everything the navigation screen renders, derived from the two session
/// snapshots. holds no state of its own.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScreenStatus {
    pub mode: TransportMode,
    pub is_searching: bool,
    pub error_message: Option<String>,
    pub route_summary: Option<String>,
    /// shown when the app cannot read the device location
    pub location_message: Option<String>,
    pub markers: Vec<Marker>,
}

impl ScreenStatus {
    pub fn from_snapshots(location: &LocationSnapshot, search: &SearchSnapshot) -> Self {
        let mut markers = vec![Marker::new(LANDMARK_NAME, LANDMARK, MarkerKind::Landmark)];
        if let Some(user) = location.coordinate {
            markers.push(Marker::new("You", user, MarkerKind::User));
        }
        if let Some(route) = &search.route {
            let label = search
                .route_query
                .as_ref()
                .map(|q| q.to_string())
                .unwrap_or_else(|| String::from("Destination"));
            markers.push(Marker::new(&label, route.destination, MarkerKind::Destination));
        }

        let location_message = if location.authorization.blocks_updates() {
            Some(format!(
                "location access is {}, enable it to search for routes",
                location.authorization
            ))
        } else {
            location.last_error.clone()
        };

        Self {
            mode: search.mode,
            is_searching: search.is_searching(),
            error_message: search.error().map(|e| e.to_string()),
            route_summary: search.route.as_ref().map(|r| r.summary()),
            location_message,
            markers,
        }
    }

    /// whether a search may be submitted for `text` right now.
    pub fn can_submit(&self, text: &str) -> bool {
        !self.is_searching && !text.trim().is_empty()
    }
}

impl Display for ScreenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.mode)?;
        if self.is_searching {
            write!(f, " searching...")?;
        }
        if let Some(summary) = &self.route_summary {
            write!(f, " route: {summary}")?;
        }
        if let Some(error) = &self.error_message {
            write!(f, " error: {error}")?;
        }
        if let Some(msg) = &self.location_message {
            write!(f, " ({msg})")?;
        }
        for marker in self.markers.iter() {
            write!(f, "\n  {} {}", marker.label, marker.coordinate)?;
        }
        Ok(())
    }
}
