//! Request types for the calculator API.
//!
//! This module defines the JSON request structures for the
//! `/payroll/recompute` and `/payroll/edit` endpoints.

use serde::{Deserialize, Serialize};

use crate::calculation::NumericInputPolicy;
use crate::models::PayrollDetail;

/// One field edit as typed by the user.
///
/// `value` may be a JSON string or number; it is parsed the same way
/// keyboard input is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEditRequest {
    /// The field's wire name, e.g. `"incomeTax"`.
    pub field: String,
    /// The raw input.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl FieldEditRequest {
    /// The input as text, the way a form field would hold it.
    pub fn raw_value(&self) -> String {
        match &self.value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Request body for the `/payroll/edit` endpoint.
///
/// Edits are applied in order, then toggles in order; the derived fields
/// are recomputed after each step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    /// The record to edit.
    pub payroll: PayrollDetail,
    /// Field edits.
    #[serde(default)]
    pub edits: Vec<FieldEditRequest>,
    /// Insurance categories to flip, by category or flag name.
    #[serde(default)]
    pub toggles: Vec<String>,
    /// Overrides the configured numeric input policy for this request.
    #[serde(default)]
    pub numeric_policy: Option<NumericInputPolicy>,
}
