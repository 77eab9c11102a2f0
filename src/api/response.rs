//! Response types for the promotion validation API.
//!
//! This module defines the validation report and the error response
//! structures of the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::validation::{PROMOTION_SECTIONS, PromotionSection, ValidationIssue};

/// One issue, with the editor section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueResponse {
    /// Dotted field path.
    pub key: String,
    /// Human-readable message.
    pub message: String,
    /// Section holding the field.
    pub section: PromotionSection,
}

impl From<ValidationIssue> for IssueResponse {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            section: PROMOTION_SECTIONS.route(&issue.key),
            key: issue.key,
            message: issue.message,
        }
    }
}

/// Body of `/promotions/validate`, and of a 422 from `/promotions/normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Whether the promotion can be submitted.
    pub valid: bool,
    /// Issues in validation order.
    pub issues: Vec<IssueResponse>,
}

impl ValidationResponse {
    /// Builds a report from validation issues.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues: issues.into_iter().map(IssueResponse::from).collect(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid wire value error response.
    pub fn invalid_wire_value(field: &str, message: &str) -> Self {
        Self::with_details(
            "INVALID_WIRE_VALUE",
            format!("Invalid value for '{}'", field),
            message.to_string(),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EditorError> for ApiErrorResponse {
    fn from(error: EditorError) -> Self {
        match error {
            EditorError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EditorError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EditorError::ReferenceNotFound { kind, code } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("REFERENCE_NOT_FOUND", format!("Unknown {}: {}", kind, code)),
            },
            EditorError::InvalidWireValue { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::invalid_wire_value(&field, &message),
            },
            EditorError::PromotionNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PROMOTION_NOT_FOUND", format!("Promotion not found: {}", id)),
            },
            EditorError::ServerRejected { issues } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    "Promotion rejected",
                    issues
                        .iter()
                        .map(|issue| format!("{}: {}", issue.key, issue.message))
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
            },
            EditorError::Transport { message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details("UPSTREAM_ERROR", "Backend unavailable", message),
            },
            EditorError::NotPersisted => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("NOT_PERSISTED", "Promotion has not been saved yet"),
            },
        }
    }
}
