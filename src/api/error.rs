use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::FETCH_TIMEOUT;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error: {status} - {error}")]
    Status { status: u16, error: Value },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Value placed in an envelope's `error` slot.
    pub fn into_envelope_error(self) -> Value {
        match self {
            FetchError::Status { error, .. } => error,
            FetchError::Timeout(_) => Value::String(FETCH_TIMEOUT.to_string()),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::InvalidResponse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_surfaces_server_value() {
        let error = FetchError::Status {
            status: 400,
            error: json!("bad"),
        };
        assert_eq!(error.to_string(), "Server error: 400 - \"bad\"");
        assert_eq!(error.into_envelope_error(), json!("bad"));
    }

    #[test]
    fn test_timeout_maps_to_fixed_message() {
        let error = FetchError::Timeout(Duration::from_millis(10));
        assert_eq!(error.into_envelope_error(), json!("Fetch timeout"));
    }

    #[test]
    fn test_parse_error_maps_to_display_string() {
        let parse = serde_json::from_str::<Value>("{not json").unwrap_err();
        let error = FetchError::from(parse);
        let value = error.into_envelope_error();
        assert!(value.as_str().unwrap().starts_with("Invalid response:"));
    }
}
