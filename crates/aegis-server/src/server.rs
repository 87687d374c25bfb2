// crates/aegis-server/src/server.rs
// ============================================================================
// Module: HTTP Server
// Description: axum HTTP JSON API over the safety store and trigger engine.
// Purpose: Expose contact, alert, and settings CRUD plus the emergency
//          trigger workflow and SMS simulation endpoints.
// Dependencies: aegis-core, aegis-config, aegis-notify, axum, tokio
// ============================================================================

//! ## Overview
//! The server wires the in-memory safety store, the emergency trigger
//! engine, and the simulated SMS backends behind an axum router. Request
//! bodies arrive as raw bytes and are parsed by hand so every failure maps
//! through the [`ApiError`] taxonomy instead of an extractor rejection.
//! Inputs are untrusted: phone numbers are validated at this boundary and
//! bodies are bounded by the configured size limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use aegis_config::AegisConfig;
use aegis_core::AlertDraft;
use aegis_core::AlertId;
use aegis_core::AlertPatch;
use aegis_core::AppSettings;
use aegis_core::ContactDraft;
use aegis_core::ContactId;
use aegis_core::ContactPatch;
use aegis_core::EmergencyAlert;
use aegis_core::EmergencyContact;
use aegis_core::EmergencyResponse;
use aegis_core::InMemoryStore;
use aegis_core::SafetyStore;
use aegis_core::SettingsPatch;
use aegis_core::SharedStore;
use aegis_core::SmsDelivery;
use aegis_core::Timestamp;
use aegis_core::TriggerEngine;
use aegis_core::TriggerError;
use aegis_core::validate_e164;
use aegis_notify::SimulatedSms;
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::MatchedPath;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::error::ApiError;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestMetricEvent;
use crate::telemetry::RequestMetrics;

// ============================================================================
// SECTION: Server Errors
// ============================================================================

/// Server lifecycle errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration was rejected.
    #[error("config error: {0}")]
    Config(String),
    /// Server state could not be initialized.
    #[error("init error: {0}")]
    Init(String),
    /// The transport failed to bind or serve.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared state behind every handler.
pub struct ServerState {
    /// Safety store holding contacts, alerts, and settings.
    store: SharedStore,
    /// Emergency trigger workflow.
    engine: TriggerEngine,
    /// Delivery backend for the standalone send-sms endpoint.
    sms: Arc<dyn SmsDelivery>,
    /// Metrics sink for request observations.
    metrics: Arc<dyn RequestMetrics>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

impl ServerState {
    /// Builds handler state from configuration parts.
    fn from_config(
        config: &AegisConfig,
        metrics: Arc<dyn RequestMetrics>,
    ) -> Result<Self, ServerError> {
        let store = if config.server.seed_sample_contacts {
            InMemoryStore::with_sample_contacts()
                .map_err(|err| ServerError::Init(err.to_string()))?
        } else {
            InMemoryStore::new()
        };
        let store = SharedStore::from_store(store);
        let engine = TriggerEngine::new(
            store.clone(),
            Arc::new(SimulatedSms::new(config.delivery.trigger_sms_delay())),
        );
        let sms: Arc<dyn SmsDelivery> =
            Arc::new(SimulatedSms::new(config.delivery.sms_delay()));
        Ok(Self {
            store,
            engine,
            sms,
            metrics,
            max_body_bytes: config.server.max_body_bytes,
        })
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Aegis HTTP server instance.
pub struct AegisServer {
    /// Validated configuration.
    config: AegisConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl AegisServer {
    /// Builds a server from configuration with discarded metrics.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when validation fails.
    pub fn from_config(config: AegisConfig) -> Result<Self, ServerError> {
        Self::from_config_with(config, Arc::new(NoopMetrics))
    }

    /// Builds a server from configuration with an explicit metrics sink.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when validation fails and
    /// [`ServerError::Init`] when state construction fails.
    pub fn from_config_with(
        config: AegisConfig,
        metrics: Arc<dyn RequestMetrics>,
    ) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let state = Arc::new(ServerState::from_config(&config, metrics)?);
        Ok(Self {
            config,
            state,
        })
    }

    /// Builds the axum router over this server's state.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves requests until failure.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let app = build_router(Arc::clone(&self.state));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the API router with the telemetry layer applied.
fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/emergency-contacts", get(list_contacts).post(create_contact))
        .route("/api/emergency-contacts/{id}", put(update_contact).delete(delete_contact))
        .route("/api/primary-contact", get(primary_contact))
        .route("/api/emergency-alerts", get(list_alerts).post(create_alert))
        .route("/api/emergency-alerts/{id}", put(update_alert))
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/send-sms", post(send_sms))
        .route("/api/emergency-trigger", post(emergency_trigger))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), track_request))
        .with_state(state)
}

/// Records a counter and latency observation per request.
async fn track_request(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_string(),
        |matched| matched.as_str().to_string(),
    );
    let started = Instant::now();
    let response = next.run(request).await;
    let event = RequestMetricEvent {
        method,
        route,
        status: response.status().as_u16(),
    };
    state.metrics.record_request(event.clone());
    state.metrics.record_latency(event, started.elapsed());
    response
}

// ============================================================================
// SECTION: Request Parsing
// ============================================================================

/// Parses a JSON body, mapping size and decode failures to the taxonomy.
fn parse_body<T: DeserializeOwned>(
    state: &ServerState,
    bytes: &Bytes,
    summary: &str,
) -> Result<T, ApiError> {
    if bytes.len() > state.max_body_bytes {
        return Err(ApiError::invalid_field(
            summary,
            "body",
            "request body exceeds the configured limit",
        ));
    }
    serde_json::from_slice(bytes)
        .map_err(|err| ApiError::invalid_field(summary, "body", err.to_string()))
}

/// Parses a contact id from its raw path form; anything unparseable is a miss.
fn contact_id(raw: &str) -> Result<ContactId, ApiError> {
    raw.parse::<u64>()
        .ok()
        .and_then(ContactId::from_raw)
        .ok_or_else(|| ApiError::NotFound("Emergency contact".to_string()))
}

/// Parses an alert id from its raw path form; anything unparseable is a miss.
fn alert_id(raw: &str) -> Result<AlertId, ApiError> {
    raw.parse::<u64>()
        .ok()
        .and_then(AlertId::from_raw)
        .ok_or_else(|| ApiError::NotFound("Emergency alert".to_string()))
}

// ============================================================================
// SECTION: Contact Handlers
// ============================================================================

/// GET /api/emergency-contacts — active contacts in id order.
async fn list_contacts(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<EmergencyContact>>, ApiError> {
    let contacts = state
        .store
        .contacts()
        .map_err(|_| ApiError::internal("Failed to fetch emergency contacts"))?;
    Ok(Json(contacts))
}

/// GET /api/primary-contact — primary contact or JSON null.
async fn primary_contact(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Option<EmergencyContact>>, ApiError> {
    let primary = state
        .store
        .primary_contact()
        .map_err(|_| ApiError::internal("Failed to fetch primary contact"))?;
    Ok(Json(primary))
}

/// POST /api/emergency-contacts — validate, create, echo the new contact.
async fn create_contact(
    State(state): State<Arc<ServerState>>,
    bytes: Bytes,
) -> Result<Json<EmergencyContact>, ApiError> {
    let draft: ContactDraft = parse_body(&state, &bytes, "Invalid contact data")?;
    validate_e164(&draft.phone)
        .map_err(|err| ApiError::invalid_field("Invalid contact data", "phone", err.to_string()))?;
    let contact = state
        .store
        .create_contact(draft)
        .map_err(|_| ApiError::internal("Failed to create emergency contact"))?;
    Ok(Json(contact))
}

/// PUT /api/emergency-contacts/{id} — partial patch, 404 when absent.
async fn update_contact(
    State(state): State<Arc<ServerState>>,
    Path(raw): Path<String>,
    bytes: Bytes,
) -> Result<Json<EmergencyContact>, ApiError> {
    let patch: ContactPatch = parse_body(&state, &bytes, "Invalid contact data")?;
    if let Some(phone) = patch.phone.as_deref() {
        validate_e164(phone).map_err(|err| {
            ApiError::invalid_field("Invalid contact data", "phone", err.to_string())
        })?;
    }
    let id = contact_id(&raw)?;
    let updated = state
        .store
        .update_contact(id, patch)
        .map_err(|_| ApiError::internal("Failed to update emergency contact"))?
        .ok_or_else(|| ApiError::NotFound("Emergency contact".to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/emergency-contacts/{id} — confirmation, 404 when absent.
async fn delete_contact(
    State(state): State<Arc<ServerState>>,
    Path(raw): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = contact_id(&raw)?;
    let existed = state
        .store
        .delete_contact(id)
        .map_err(|_| ApiError::internal("Failed to delete emergency contact"))?;
    if !existed {
        return Err(ApiError::NotFound("Emergency contact".to_string()));
    }
    Ok(Json(json!({ "message": "Emergency contact deleted successfully" })))
}

// ============================================================================
// SECTION: Alert Handlers
// ============================================================================

/// GET /api/emergency-alerts — every alert in id order.
async fn list_alerts(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<EmergencyAlert>>, ApiError> {
    let alerts = state
        .store
        .alerts()
        .map_err(|_| ApiError::internal("Failed to fetch emergency alerts"))?;
    Ok(Json(alerts))
}

/// POST /api/emergency-alerts — create, notify every active contact.
///
/// The response echoes the record as created; the `contacts_notified`
/// patch applied afterwards is visible on the next read. Clients depend
/// on this echo-then-patch ordering.
async fn create_alert(
    State(state): State<Arc<ServerState>>,
    bytes: Bytes,
) -> Result<Json<EmergencyAlert>, ApiError> {
    let draft: AlertDraft = parse_body(&state, &bytes, "Invalid alert data")?;
    let created = state
        .store
        .create_alert(draft)
        .map_err(|_| ApiError::internal("Failed to create emergency alert"))?;
    let contacts = state
        .store
        .contacts()
        .map_err(|_| ApiError::internal("Failed to create emergency alert"))?;
    let notified = contacts.into_iter().map(|contact| contact.phone).collect();
    state
        .store
        .update_alert(
            created.id,
            AlertPatch {
                contacts_notified: Some(notified),
                ..AlertPatch::default()
            },
        )
        .map_err(|_| ApiError::internal("Failed to create emergency alert"))?;
    Ok(Json(created))
}

/// PUT /api/emergency-alerts/{id} — partial patch, 404 when absent.
async fn update_alert(
    State(state): State<Arc<ServerState>>,
    Path(raw): Path<String>,
    bytes: Bytes,
) -> Result<Json<EmergencyAlert>, ApiError> {
    let patch: AlertPatch = parse_body(&state, &bytes, "Invalid alert data")?;
    let id = alert_id(&raw)?;
    let updated = state
        .store
        .update_alert(id, patch)
        .map_err(|_| ApiError::internal("Failed to update emergency alert"))?
        .ok_or_else(|| ApiError::NotFound("Emergency alert".to_string()))?;
    Ok(Json(updated))
}

// ============================================================================
// SECTION: Settings Handlers
// ============================================================================

/// GET /api/settings — the settings singleton.
async fn get_settings(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<AppSettings>, ApiError> {
    let settings = state
        .store
        .settings()
        .map_err(|_| ApiError::internal("Failed to fetch app settings"))?;
    Ok(Json(settings))
}

/// PUT /api/settings — partial patch, echo the updated singleton.
async fn update_settings(
    State(state): State<Arc<ServerState>>,
    bytes: Bytes,
) -> Result<Json<AppSettings>, ApiError> {
    let patch: SettingsPatch = parse_body(&state, &bytes, "Invalid settings data")?;
    let updated = state
        .store
        .update_settings(patch)
        .map_err(|_| ApiError::internal("Failed to update app settings"))?;
    Ok(Json(updated))
}

// ============================================================================
// SECTION: SMS and Trigger Handlers
// ============================================================================

/// POST /api/send-sms request payload.
#[derive(Debug, Deserialize)]
struct SendSmsRequest {
    /// Destination phone number.
    phone: String,
    /// Message text.
    message: String,
}

/// POST /api/send-sms response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsResponse {
    /// Whether the simulated delivery succeeded.
    success: bool,
    /// Human-readable outcome.
    message: String,
    /// Destination phone number.
    phone: String,
    /// When the simulated delivery completed.
    sent_at: Timestamp,
}

/// POST /api/send-sms — simulated delivery with the configured delay.
async fn send_sms(
    State(state): State<Arc<ServerState>>,
    bytes: Bytes,
) -> Result<Json<SendSmsResponse>, ApiError> {
    let request: SendSmsRequest = parse_body(&state, &bytes, "Invalid SMS data")?;
    let receipt = state
        .sms
        .send(&request.phone, &request.message)
        .await
        .map_err(|_| ApiError::internal("Failed to send SMS"))?;
    Ok(Json(SendSmsResponse {
        success: true,
        message: "SMS sent successfully".to_string(),
        phone: request.phone,
        sent_at: receipt.sent_at,
    }))
}

/// POST /api/emergency-trigger request payload.
#[derive(Debug, Default, Deserialize)]
struct TriggerRequest {
    /// Latitude in decimal degrees, when known.
    latitude: Option<f64>,
    /// Longitude in decimal degrees, when known.
    longitude: Option<f64>,
}

/// POST /api/emergency-trigger — run the emergency workflow.
async fn emergency_trigger(
    State(state): State<Arc<ServerState>>,
    bytes: Bytes,
) -> Result<Json<EmergencyResponse>, ApiError> {
    let request: TriggerRequest = if bytes.is_empty() {
        TriggerRequest::default()
    } else {
        parse_body(&state, &bytes, "Invalid trigger data")?
    };
    let response =
        state.engine.trigger(request.latitude, request.longitude).await.map_err(
            |err| match err {
                TriggerError::NoPrimaryContact => ApiError::MissingPrimaryContact,
                TriggerError::Store(_) | TriggerError::Delivery(_) => {
                    ApiError::internal("Failed to trigger emergency alert")
                }
            },
        )?;
    Ok(Json(response))
}

// ============================================================================
// SECTION: Health Handler
// ============================================================================

/// GET /healthz — readiness probe over the store.
async fn healthz(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    state.store.readiness().map_err(|_| ApiError::internal("Service not ready"))?;
    Ok(Json(json!({ "status": "ok" })))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "server/tests.rs"]
mod tests;
