mod mapnav_app_error;
mod mapnav_cli;
mod navigate_app;
mod navigator_config;
mod search_app;

pub use mapnav_app_error::MapnavAppError;
pub use mapnav_cli::{MapnavApp, MapnavOperation};
pub use navigate_app::{run_navigate, NavigatorCommand};
pub use navigator_config::NavigatorConfig;
pub use search_app::{route_feature_collection, run_search};
