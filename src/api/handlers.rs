//! HTTP request handlers for the payroll calculator API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{deduction_breakdown, recompute, set_field, toggle_applicability};
use crate::error::EngineResult;
use crate::models::{InsuranceCategory, PayrollDetail, PayrollField};

use super::request::EditRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/recompute", post(recompute_handler))
        .route("/payroll/edit", post(edit_handler))
        .with_state(state)
}

/// Handler for POST /payroll/recompute.
///
/// Accepts a payroll record and returns it with the derived fields
/// recomputed, along with the itemised deductions.
async fn recompute_handler(payload: Result<Json<PayrollDetail>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recompute request");

    let detail = match payload {
        Ok(Json(detail)) => detail,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let response = calculation_response(recompute(&detail));
    info!(
        correlation_id = %correlation_id,
        total_deductions = %response.payroll.total_deductions,
        net_pay = %response.payroll.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Recompute completed successfully"
    );
    json_response(StatusCode::OK, response)
}

/// Handler for POST /payroll/edit.
///
/// Applies the requested field edits and applicability toggles in order.
async fn edit_handler(
    State(state): State<AppState>,
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing edit request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let edits = request.edits.len();
    let toggles = request.toggles.len();
    match apply_edits(&state, request) {
        Ok(detail) => {
            let response = calculation_response(detail);
            info!(
                correlation_id = %correlation_id,
                edits,
                toggles,
                net_pay = %response.payroll.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Edit completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Edit failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Runs an [`EditRequest`] through the calculator.
fn apply_edits(state: &AppState, request: EditRequest) -> EngineResult<PayrollDetail> {
    let policy = request
        .numeric_policy
        .unwrap_or_else(|| state.numeric_policy());

    let mut detail = recompute(&request.payroll);
    for edit in &request.edits {
        let field: PayrollField = edit.field.parse()?;
        detail = set_field(&detail, field, &edit.raw_value(), policy)?;
    }
    for name in &request.toggles {
        let category: InsuranceCategory = name.parse()?;
        detail = toggle_applicability(&detail, category);
    }
    Ok(detail)
}

fn calculation_response(payroll: PayrollDetail) -> CalculationResponse {
    CalculationResponse {
        calculation_id: Uuid::new_v4(),
        calculated_at: Utc::now(),
        breakdown: deduction_breakdown(&payroll),
        payroll,
    }
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
