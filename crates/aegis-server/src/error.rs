// crates/aegis-server/src/error.rs
// ============================================================================
// Module: API Error Taxonomy
// Description: HTTP error taxonomy for the Aegis JSON API.
// Purpose: Map every handler failure to a stable status and JSON body.
// Dependencies: axum, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every handler returns `Result<_, ApiError>`; nothing propagates
//! unhandled. Validation failures carry per-field detail, lookups that miss
//! return 404 with the resource named, a missing primary contact is a 400
//! configuration error, and everything else collapses to a 500 with a fixed
//! message so internals never leak to clients.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Field Errors
// ============================================================================

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Offending field name.
    pub field: String,
    /// Why the field was rejected.
    pub message: String,
}

impl FieldError {
    /// Builds a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: API Error
// ============================================================================

/// Handler failure taxonomy.
///
/// # Invariants
/// - Status mapping is stable: validation 400, not-found 404, missing
///   primary 400, internal 500.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed validation.
    #[error("{message}")]
    Validation {
        /// Summary shown to the client.
        message: String,
        /// Per-field detail.
        errors: Vec<FieldError>,
    },
    /// The addressed resource does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// The trigger workflow requires a primary contact.
    #[error("No primary contact configured")]
    MissingPrimaryContact,
    /// Unexpected failure; the message is fixed per route.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Validation failure with a single offending field.
    #[must_use]
    pub fn invalid_field(
        message: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            errors: vec![FieldError::new(field, detail)],
        }
    }

    /// Internal failure with a route-specific fixed message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Status code this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::MissingPrimaryContact => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation { message, errors } => {
                json!({ "message": message, "errors": errors })
            }
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
