mod route_search_controller;
mod search_error;
mod search_query;
mod search_state;

pub use route_search_controller::RouteSearchController;
pub use search_error::SearchError;
pub use search_query::SearchQuery;
pub use search_state::{SearchOutcome, SearchSessionState, SearchSnapshot};
