//! Site administration API client error types.

/// Errors from calls to the site administration API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The method and path that was called.
        endpoint: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The server answered 401: the bearer token is missing, invalid or
    /// expired. Callers typically discard the token and send the user to
    /// the login screen.
    #[error("authentication expired calling {endpoint}")]
    AuthExpired {
        /// The method and path that was called.
        endpoint: String,
    },

    /// The server returned any other non-2xx status.
    #[error("site API {endpoint} returned {status}: {message}")]
    Api {
        /// The method and path that was called.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// The envelope `message`, or the raw body if it was not an envelope.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The method and path that was called.
        endpoint: String,
        /// The underlying decode error.
        source: reqwest::Error,
    },

    /// A successful response carried no `data`.
    #[error("site API {endpoint} returned no data: {message}")]
    EmptyEnvelope {
        /// The method and path that was called.
        endpoint: String,
        /// The envelope `message`, if any.
        message: String,
    },

    /// The bearer token cannot be sent in an HTTP header.
    #[error("bearer token is empty or contains invalid characters")]
    InvalidToken,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// The HTTP status associated with this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::AuthExpired { .. } => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
