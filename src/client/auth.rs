//! Request-scoped bearer credentials.

use reqwest::header::HeaderValue;

use super::ClientError;

/// The bearer token for one user session, passed explicitly to every call.
///
/// The `Debug` implementation redacts the token so it never reaches logs.
///
/// # Example
///
/// ```
/// use site_payroll::client::AuthContext;
///
/// let auth = AuthContext::new("eyJhbGciOi...").unwrap();
/// assert_eq!(format!("{auth:?}"), "AuthContext { token: \"[REDACTED]\" }");
/// assert!(AuthContext::new("  ").is_err());
/// ```
#[derive(Clone)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    /// Wraps a bearer token, rejecting empty tokens and tokens that cannot
    /// appear in an HTTP header.
    pub fn new(token: impl Into<String>) -> Result<Self, ClientError> {
        let token = token.into().trim().to_string();
        if token.is_empty() || HeaderValue::from_str(&format!("Bearer {token}")).is_err() {
            return Err(ClientError::InvalidToken);
        }
        Ok(Self { token })
    }

    /// The `Authorization` header value, marked sensitive.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, ClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| ClientError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
