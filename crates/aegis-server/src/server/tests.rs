// crates/aegis-server/src/server/tests.rs
// ============================================================================
// Module: HTTP Server Unit Tests
// Description: Unit tests for handler behavior and status mapping.
// Purpose: Validate the JSON API against an in-memory store with zero-delay
//          delivery backends.
// Dependencies: aegis-server
// ============================================================================

//! ## Overview
//! Exercises the API handlers directly with in-memory state, covering the
//! validation, not-found, and missing-primary paths alongside the happy
//! ones.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions over handler results."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use aegis_core::ContactDraft;
use aegis_core::InMemoryStore;
use aegis_core::SafetyStore;
use aegis_core::SharedStore;
use aegis_core::alert_status;
use aegis_notify::SimulatedSms;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;

use super::ApiError;
use super::NoopMetrics;
use super::ServerState;
use super::TriggerEngine;
use super::create_alert;
use super::create_contact;
use super::delete_contact;
use super::emergency_trigger;
use super::get_settings;
use super::healthz;
use super::list_alerts;
use super::list_contacts;
use super::primary_contact;
use super::send_sms;
use super::update_alert;
use super::update_contact;
use super::update_settings;

/// Builds handler state over an empty store with zero-delay delivery.
fn test_state() -> Arc<ServerState> {
    state_over(InMemoryStore::new())
}

/// Builds handler state over the given store with zero-delay delivery.
fn state_over(store: InMemoryStore) -> Arc<ServerState> {
    let store = SharedStore::from_store(store);
    let engine = TriggerEngine::new(store.clone(), Arc::new(SimulatedSms::new(Duration::ZERO)));
    Arc::new(ServerState {
        store,
        engine,
        sms: Arc::new(SimulatedSms::new(Duration::ZERO)),
        metrics: Arc::new(NoopMetrics),
        max_body_bytes: 64 * 1024,
    })
}

/// Serializes a JSON value into a request body.
fn body(value: serde_json::Value) -> Bytes {
    Bytes::from(serde_json::to_vec(&value).unwrap())
}

/// Seeds one contact and returns its id raw value.
fn seed_contact(state: &Arc<ServerState>, phone: &str, is_primary: bool) -> u64 {
    let contact = state
        .store
        .create_contact(ContactDraft {
            name: "Test Contact".to_string(),
            phone: phone.to_string(),
            relationship: None,
            is_primary: Some(is_primary),
            is_active: None,
        })
        .unwrap();
    contact.id.get()
}

/// Tests phone validation and the echoed contact on creation.
#[tokio::test]
async fn create_contact_validates_phone_and_echoes_the_record() {
    let state = test_state();
    let rejected = create_contact(
        State(Arc::clone(&state)),
        body(json!({ "name": "Jane", "phone": "0123456789" })),
    )
    .await;
    match rejected {
        Err(err @ ApiError::Validation { .. }) => {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    let created = create_contact(
        State(Arc::clone(&state)),
        body(json!({ "name": "Jane", "phone": "+92123456789", "isPrimary": true })),
    )
    .await
    .unwrap();
    assert_eq!(created.0.phone, "+92123456789");
    assert!(created.0.is_primary);
    let listed = list_contacts(State(state)).await.unwrap();
    assert_eq!(listed.0.len(), 1);
}

/// Tests that the primary endpoint serializes absence as JSON null.
#[tokio::test]
async fn primary_contact_returns_null_when_unset() {
    let state = test_state();
    let primary = primary_contact(State(Arc::clone(&state))).await.unwrap();
    assert!(primary.0.is_none());
    seed_contact(&state, "+92123456789", true);
    let primary = primary_contact(State(state)).await.unwrap();
    assert_eq!(primary.0.map(|contact| contact.phone), Some("+92123456789".to_string()));
}

/// Tests contact patching, phone re-validation, and the 404 mapping.
#[tokio::test]
async fn update_contact_maps_absence_to_not_found() {
    let state = test_state();
    let missing = update_contact(
        State(Arc::clone(&state)),
        Path("42".to_string()),
        body(json!({ "name": "Renamed" })),
    )
    .await;
    match missing {
        Err(err @ ApiError::NotFound(_)) => {
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
        }
        other => panic!("expected not-found, got {other:?}"),
    }
    let id = seed_contact(&state, "+92123456789", false);
    let updated = update_contact(
        State(Arc::clone(&state)),
        Path(id.to_string()),
        body(json!({ "name": "Renamed" })),
    )
    .await
    .unwrap();
    assert_eq!(updated.0.name, "Renamed");
    // Phone patches are validated like creates.
    let rejected = update_contact(
        State(state),
        Path(id.to_string()),
        body(json!({ "phone": "+0123" })),
    )
    .await;
    assert!(matches!(rejected, Err(ApiError::Validation { .. })));
}

/// Tests that non-numeric path ids resolve to the JSON 404, not a
/// plain-text extractor rejection.
#[tokio::test]
async fn non_numeric_path_ids_map_to_not_found() {
    let state = test_state();
    let contact = update_contact(
        State(Arc::clone(&state)),
        Path("abc".to_string()),
        body(json!({ "name": "Renamed" })),
    )
    .await;
    match contact {
        Err(err @ ApiError::NotFound(_)) => {
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
        }
        other => panic!("expected not-found, got {other:?}"),
    }
    let deleted = delete_contact(State(Arc::clone(&state)), Path("0".to_string())).await;
    assert!(matches!(deleted, Err(ApiError::NotFound(_))));
    let alert = update_alert(
        State(state),
        Path("-1".to_string()),
        body(json!({ "status": "resolved" })),
    )
    .await;
    assert!(matches!(alert, Err(ApiError::NotFound(_))));
}

/// Tests the delete confirmation and the second-delete 404.
#[tokio::test]
async fn delete_contact_confirms_and_then_misses() {
    let state = test_state();
    let id = seed_contact(&state, "+92123456789", false);
    let confirmed =
        delete_contact(State(Arc::clone(&state)), Path(id.to_string())).await.unwrap();
    assert_eq!(
        confirmed.0.get("message").and_then(|message| message.as_str()),
        Some("Emergency contact deleted successfully")
    );
    let missing = delete_contact(State(state), Path(id.to_string())).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

/// Tests that alert creation echoes the record before the notify patch.
#[tokio::test]
async fn create_alert_echoes_the_pre_patch_record() {
    let state = test_state();
    seed_contact(&state, "+92123456789", true);
    seed_contact(&state, "+919876543210", false);
    let created = create_alert(
        State(Arc::clone(&state)),
        body(json!({ "latitude": "12.34", "longitude": "56.78" })),
    )
    .await
    .unwrap();
    // The response predates the notification patch.
    assert!(created.0.contacts_notified.is_none());
    assert_eq!(created.0.status, alert_status::ACTIVE);
    let listed = list_alerts(State(state)).await.unwrap();
    assert_eq!(
        listed.0[0].contacts_notified,
        Some(vec!["+92123456789".to_string(), "+919876543210".to_string()])
    );
}

/// Tests alert patching and the 404 mapping for absent ids.
#[tokio::test]
async fn update_alert_patches_status_and_maps_absence() {
    let state = test_state();
    let missing = update_alert(
        State(Arc::clone(&state)),
        Path("7".to_string()),
        body(json!({ "status": "resolved" })),
    )
    .await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
    let created = create_alert(State(Arc::clone(&state)), body(json!({}))).await.unwrap();
    let updated = update_alert(
        State(state),
        Path(created.0.id.get().to_string()),
        body(json!({ "status": "resolved" })),
    )
    .await
    .unwrap();
    assert_eq!(updated.0.status, alert_status::RESOLVED);
}

/// Tests that a settings patch leaves unnamed fields intact.
#[tokio::test]
async fn settings_roundtrip_preserves_unpatched_fields() {
    let state = test_state();
    let updated = update_settings(
        State(Arc::clone(&state)),
        body(json!({ "sirenEnabled": false })),
    )
    .await
    .unwrap();
    assert!(!updated.0.siren_enabled);
    assert!(updated.0.shake_detection_enabled);
    let settings = get_settings(State(state)).await.unwrap();
    assert!(!settings.0.siren_enabled);
}

/// Tests the simulated send-sms response shape.
#[tokio::test]
async fn send_sms_reports_success_with_the_echoed_phone() {
    let state = test_state();
    let response = send_sms(
        State(state),
        body(json!({ "phone": "+92123456789", "message": "hello" })),
    )
    .await
    .unwrap();
    assert!(response.0.success);
    assert_eq!(response.0.message, "SMS sent successfully");
    assert_eq!(response.0.phone, "+92123456789");
}

/// Tests the 400 mapping when no primary contact exists.
#[tokio::test]
async fn trigger_without_primary_is_a_configuration_error() {
    let state = test_state();
    let rejected = emergency_trigger(State(Arc::clone(&state)), body(json!({}))).await;
    match rejected {
        Err(err @ ApiError::MissingPrimaryContact) => {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.to_string(), "No primary contact configured");
        }
        other => panic!("expected missing-primary, got {other:?}"),
    }
    // No alert record may exist after the failure.
    let listed = list_alerts(State(state)).await.unwrap();
    assert!(listed.0.is_empty());
}

/// Tests the trigger response with coordinates and the notified list.
#[tokio::test]
async fn trigger_with_coordinates_embeds_a_map_link() {
    let state = test_state();
    seed_contact(&state, "+92123456789", true);
    let response = emergency_trigger(
        State(Arc::clone(&state)),
        body(json!({ "latitude": 12.34, "longitude": 56.78 })),
    )
    .await
    .unwrap();
    assert!(response.0.success);
    assert!(response.0.sms_sent);
    assert_eq!(response.0.alert.latitude.as_deref(), Some("12.34"));
    assert_eq!(
        response.0.alert.contacts_notified,
        Some(vec!["+92123456789".to_string()])
    );
    assert_eq!(response.0.primary_contact.phone, "+92123456789");
    assert_eq!(response.0.message, "Emergency alert sent to primary contact");
}

/// Tests that bodies beyond the limit are rejected before decoding.
#[tokio::test]
async fn oversized_bodies_are_rejected_before_parsing() {
    let state = test_state();
    let oversized = "x".repeat(128 * 1024);
    let rejected = create_contact(
        State(state),
        body(json!({ "name": oversized, "phone": "+92123456789" })),
    )
    .await;
    assert!(matches!(rejected, Err(ApiError::Validation { .. })));
}

/// Tests the readiness probe over a healthy store.
#[tokio::test]
async fn healthz_reports_ok_over_a_live_store() {
    let state = test_state();
    let response = healthz(State(state)).await.unwrap();
    assert_eq!(response.0.get("status").and_then(|status| status.as_str()), Some("ok"));
}

/// Tests that seeded sample data exposes the expected primary.
#[tokio::test]
async fn sample_seeding_provides_a_primary_contact() {
    let state = state_over(InMemoryStore::with_sample_contacts().unwrap());
    let primary = primary_contact(State(state)).await.unwrap();
    assert_eq!(primary.0.map(|contact| contact.phone), Some("+923001234567".to_string()));
}
