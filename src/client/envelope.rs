//! The `{status, message, data}` response envelope.

use serde::Deserialize;

use super::ClientError;

/// Every response from the site administration API is wrapped in this
/// envelope. `status` is echoed as either a number or a string depending on
/// the endpoint, so it is kept untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Status echoed by the server.
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// The payload. Missing and `null` both read as `None`.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, failing if the server sent none.
    pub fn into_data(self, endpoint: &str) -> Result<T, ClientError> {
        self.data.ok_or_else(|| ClientError::EmptyEnvelope {
            endpoint: endpoint.to_string(),
            message: self.message.unwrap_or_default(),
        })
    }
}

/// Extracts a human-readable error message from a non-2xx body: the
/// envelope `message` when the body is one, otherwise the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.to_string())
}
