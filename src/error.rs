//! Error types for the promotion editor.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that travels through the error channel. Validation
//! problems are *not* errors: they are returned as
//! [`ValidationIssue`](crate::validation::ValidationIssue) values.

use thiserror::Error;

use crate::validation::ValidationIssue;

/// The main error type for the promotion editor.
///
/// # Example
///
/// ```
/// use promotion_editor::error::EditorError;
///
/// let error = EditorError::ConfigNotFound {
///     path: "/missing/products.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/products.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reference-data file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Reference-data file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A reference entry (product, family, payment term...) is unknown.
    #[error("Unknown {kind}: {code}")]
    ReferenceNotFound {
        /// The kind of reference data that was searched.
        kind: &'static str,
        /// The code that was not found.
        code: String,
    },

    /// A wire payload carried a value that cannot be mapped onto the model.
    #[error("Invalid value for '{field}': {message}")]
    InvalidWireValue {
        /// The wire field holding the value.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The requested promotion no longer exists on the backend.
    #[error("Promotion not found: {id}")]
    PromotionNotFound {
        /// The backend identifier of the promotion.
        id: i64,
    },

    /// The backend rejected the submission with field-keyed messages.
    #[error("Promotion rejected by the server ({} issue(s))", issues.len())]
    ServerRejected {
        /// The field-keyed messages returned by the backend.
        issues: Vec<ValidationIssue>,
    },

    /// The request did not reach the backend or got no usable answer.
    #[error("Transport error: {message}")]
    Transport {
        /// A description of the transport failure.
        message: String,
    },

    /// The operation requires a promotion that has already been persisted.
    #[error("Promotion has not been saved yet")]
    NotPersisted,
}

/// A type alias for Results that return EditorError.
pub type EditorResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EditorError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EditorError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_reference_not_found_displays_kind_and_code() {
        let error = EditorError::ReferenceNotFound {
            kind: "product",
            code: "SKU-404".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown product: SKU-404");
    }

    #[test]
    fn test_invalid_wire_value_displays_field_and_message() {
        let error = EditorError::InvalidWireValue {
            field: "lines.0.assortment_type".to_string(),
            message: "unknown assortment type 'seven'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'lines.0.assortment_type': unknown assortment type 'seven'"
        );
    }

    #[test]
    fn test_promotion_not_found_displays_id() {
        let error = EditorError::PromotionNotFound { id: 42 };
        assert_eq!(error.to_string(), "Promotion not found: 42");
    }

    #[test]
    fn test_server_rejected_displays_issue_count() {
        let error = EditorError::ServerRejected {
            issues: vec![
                ValidationIssue::new("code", "déjà utilisé"),
                ValidationIssue::new("name", "trop long"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Promotion rejected by the server (2 issue(s))"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EditorError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_transport() -> EditorResult<()> {
            Err(EditorError::Transport {
                message: "connection reset".to_string(),
            })
        }

        fn propagates_error() -> EditorResult<()> {
            returns_transport()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
