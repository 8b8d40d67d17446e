//! HTTP API module for the payroll calculator.
//!
//! This module exposes the deduction calculator over REST so that form
//! clients can recompute a payroll record, or apply a batch of field edits
//! and applicability toggles, without a round-trip to the site
//! administration API.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EditRequest, FieldEditRequest};
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
