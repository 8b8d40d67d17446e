//! Typed HTTP client for the construction-site administration API.
//!
//! Only the payroll endpoints are covered. Every call takes an explicit
//! [`AuthContext`]; there is no process-wide token. A 401 from any endpoint
//! surfaces as [`ClientError::AuthExpired`] and it is up to the caller to
//! clear the session or send the user back to login.

mod auth;
mod envelope;
mod error;
mod payroll;

pub use auth::AuthContext;
pub use envelope::ApiEnvelope;
pub use error::ClientError;
pub use payroll::SitePayrollClient;
