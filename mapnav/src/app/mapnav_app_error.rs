use crate::model::{location::SensorError, search::SearchError};

#[derive(thiserror::Error, Debug)]
pub enum MapnavAppError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failure writing configuration: {source}")]
    ConfigWriteError {
        #[from]
        source: toml::ser::Error,
    },
    #[error("failure starting location sensor: {source}")]
    SensorError {
        #[from]
        source: SensorError,
    },
    #[error("search failed: {source}")]
    SearchError {
        #[from]
        source: SearchError,
    },
    #[error("failure writing output: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("{0}")]
    InternalError(String),
}
