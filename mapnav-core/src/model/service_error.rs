use std::time::Duration;

/// failure reported by an external collaborator (geocoding or directions service).
/// kept cloneable so it can be recorded in observable session state.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("no response after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(String),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("failure decoding service response: {0}")]
    Decode(String),
}
