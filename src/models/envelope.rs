use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Code attached to every failed envelope.
pub const INTERNAL_ERROR: &str = "internal_error";

/// Error value carried when a request loses the race against its deadline.
pub const FETCH_TIMEOUT: &str = "Fetch timeout";

/// Uniform result shape returned by every fetch operation.
///
/// `code` is what marks a failure; `error` may legitimately be JSON `null`
/// when a server rejects a request without saying why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T = Value> {
    pub data: Option<T>,
    pub error: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Deserialize)]
struct WireEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    code: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireEnvelope::<T>::deserialize(deserializer)?;

        // serde reads `"error": null` as None; a coded envelope keeps it as a null error.
        let error = match (wire.error, &wire.code) {
            (None, Some(_)) => Some(Value::Null),
            (error, _) => error,
        };

        Ok(Self {
            data: wire.data,
            error,
            code: wire.code,
        })
    }
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn failure(error: impl Into<Value>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            code: Some(INTERNAL_ERROR.to_string()),
        }
    }

    pub fn timeout() -> Self {
        Self::failure(FETCH_TIMEOUT)
    }

    pub fn is_success(&self) -> bool {
        self.code.is_none()
    }

    pub fn is_timeout(&self) -> bool {
        matches!(&self.error, Some(Value::String(message)) if message == FETCH_TIMEOUT)
    }

    /// Collapse into a `Result`, yielding the error value on failure.
    ///
    /// A success envelope whose payload is absent maps to `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, Value> {
        match self.code {
            Some(_) => Err(self.error.unwrap_or(Value::Null)),
            None => Ok(self.data),
        }
    }
}
