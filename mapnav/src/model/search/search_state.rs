use mapnav_core::model::{RouteResult, TransportMode};

use super::{SearchError, SearchQuery};

/// lifecycle of the most recently initiated search.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchSessionState {
    #[default]
    Idle,
    InFlight,
    Succeeded(RouteResult),
    Failed(SearchError),
}

/// everything the presentation layer reads from the search controller.
///
/// `route` holds the last successfully applied result. it is only ever
/// replaced by a newer success, so a failed re-search keeps the previous
/// destination and path on screen. `route_query` is the query that produced
/// `route` and changes with it, while `last_query` follows every search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub state: SearchSessionState,
    pub route: Option<RouteResult>,
    pub route_query: Option<SearchQuery>,
    /// text re-searched when the transport mode changes
    pub last_query: Option<SearchQuery>,
    pub mode: TransportMode,
    /// token of the most recently initiated search
    pub generation: u64,
}

impl SearchSnapshot {
    pub fn new(mode: TransportMode) -> Self {
        Self {
            state: SearchSessionState::Idle,
            route: None,
            route_query: None,
            last_query: None,
            mode,
            generation: 0,
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.state, SearchSessionState::InFlight)
    }

    pub fn error(&self) -> Option<&SearchError> {
        match &self.state {
            SearchSessionState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// what happened to one call to `search`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// the query was blank, nothing was started.
    EmptyQuery,
    /// the search ran to completion and its result is now the session state.
    Completed(Result<RouteResult, SearchError>),
    /// a newer search was initiated before this one completed; its result was dropped.
    Superseded,
}
