//! HTTP request handlers for the promotion validation API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Promotion;
use crate::validation::{ValidationContext, ValidationIssue, validate_promotion, validate_references};
use crate::wire::{WirePromotion, inbound, outbound};

use super::response::{ApiError, ApiErrorResponse, ValidationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/promotions/validate", post(validate_handler))
        .route("/promotions/normalize", post(normalize_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns the request body into a canonical promotion, or into the error
/// response to send back.
fn read_promotion(
    correlation_id: Uuid,
    payload: Result<Json<WirePromotion>, JsonRejection>,
) -> Result<Promotion, Response> {
    let wire = match payload {
        Ok(Json(wire)) => wire,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
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
            return Err(json_response(StatusCode::BAD_REQUEST, error));
        }
    };

    inbound(wire).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Invalid wire value"
        );
        let api_error: ApiErrorResponse = err.into();
        json_response(api_error.status, api_error.error)
    })
}

/// Runs structural and reference checks.
///
/// A promotion without an identifier is treated as new.
fn check(state: &AppState, promotion: &Promotion) -> Vec<ValidationIssue> {
    let context = if promotion.id.is_none() {
        ValidationContext::for_new(state.today())
    } else {
        ValidationContext::for_existing(state.today())
    };
    let mut issues = validate_promotion(promotion, context);
    issues.extend(validate_references(promotion, state.config()));
    issues
}

/// Handler for POST /promotions/validate.
///
/// Always answers 200 with the validation report when the body could be
/// read.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<WirePromotion>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let promotion = match read_promotion(correlation_id, payload) {
        Ok(promotion) => promotion,
        Err(response) => return response,
    };

    let report = ValidationResponse::from_issues(check(&state, &promotion));
    info!(
        correlation_id = %correlation_id,
        code = %promotion.code,
        lines = promotion.lines.len(),
        valid = report.valid,
        issues = report.issues.len(),
        "Validation completed"
    );
    json_response(StatusCode::OK, report)
}

/// Handler for POST /promotions/normalize.
///
/// Answers with the outbound document, or 422 with the validation report.
async fn normalize_handler(
    State(state): State<AppState>,
    payload: Result<Json<WirePromotion>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing normalization request");

    let promotion = match read_promotion(correlation_id, payload) {
        Ok(promotion) => promotion,
        Err(response) => return response,
    };

    let issues = check(&state, &promotion);
    if !issues.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            issues = issues.len(),
            "Promotion failed validation"
        );
        return json_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            ValidationResponse::from_issues(issues),
        );
    }

    let document = outbound(&promotion);
    info!(
        correlation_id = %correlation_id,
        code = %document.code,
        lines = document.lines.len(),
        "Normalization completed"
    );
    json_response(StatusCode::OK, document)
}
