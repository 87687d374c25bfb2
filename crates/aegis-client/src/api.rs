// crates/aegis-client/src/api.rs
// ============================================================================
// Module: api
// Description: Trigger API boundary and its HTTP implementation.
// Purpose: Let the alert session raise an emergency against the Aegis
//          server, or against a stub in tests.
// Dependencies: aegis-core, async-trait, reqwest, serde_json
// ============================================================================

//! ## Overview
//!
//! The alert session talks to the server through [`TriggerApi`], a single
//! async operation that raises an emergency with optional coordinates and
//! returns the server's [`EmergencyResponse`]. [`HttpTriggerApi`] is the
//! production implementation over `reqwest`; tests substitute in-memory
//! stubs.

use aegis_core::EmergencyResponse;
use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Boundary
// ============================================================================

/// Why raising an emergency failed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("trigger request failed: {0}")]
    Http(String),
    /// The server refused the trigger.
    #[error("trigger rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// Server-provided failure message.
        message: String,
    },
    /// The response body was not a valid emergency response.
    #[error("trigger response malformed: {0}")]
    Decode(String),
}

/// Raises an emergency on behalf of the device.
#[async_trait]
pub trait TriggerApi: Send + Sync {
    /// Triggers the emergency workflow with optional coordinates.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the workflow cannot be completed.
    async fn trigger(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<EmergencyResponse, ApiError>;
}

// ============================================================================
// SECTION: HTTP implementation
// ============================================================================

/// [`TriggerApi`] over the Aegis HTTP API.
pub struct HttpTriggerApi {
    /// Server base URL without a trailing slash, e.g. `http://127.0.0.1:5000`.
    base_url: String,
    /// Shared HTTP client.
    client: reqwest::Client,
}

impl HttpTriggerApi {
    /// Builds a client targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TriggerApi for HttpTriggerApi {
    async fn trigger(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<EmergencyResponse, ApiError> {
        let url = format!("{}/api/emergency-trigger", self.base_url);
        let body = json!({ "latitude": latitude, "longitude": longitude });
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ApiError::Http(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(|message| message.as_str())
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| status.to_string());
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<EmergencyResponse>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}
