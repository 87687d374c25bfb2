// crates/aegis-core/tests/trigger.rs
// ============================================================================
// Module: Trigger Workflow Tests
// Description: Validate the emergency trigger sequence end to end.
// Purpose: Ensure primary lookup, alert creation, and delivery compose correctly.
// Dependencies: aegis-core, async-trait, tokio
// ============================================================================

//! Trigger workflow tests with an in-memory store and a recording delivery
//! stub standing in for the simulated SMS backend.

use std::sync::Arc;
use std::sync::Mutex;

use aegis_core::ContactDraft;
use aegis_core::DeliveryError;
use aegis_core::DeliveryReceipt;
use aegis_core::InMemoryStore;
use aegis_core::SafetyStore;
use aegis_core::SharedStore;
use aegis_core::SmsDelivery;
use aegis_core::Timestamp;
use aegis_core::TriggerEngine;
use aegis_core::TriggerError;
use aegis_core::location_reference;
use async_trait::async_trait;

/// Test result alias keeping assertions free of panics.
type TestResult = Result<(), String>;

/// Delivery stub recording every message it receives.
#[derive(Default)]
struct RecordingDelivery {
    /// Messages delivered so far as (phone, message) pairs.
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SmsDelivery for RecordingDelivery {
    async fn send(&self, phone: &str, message: &str) -> Result<DeliveryReceipt, DeliveryError> {
        let mut sent =
            self.sent.lock().map_err(|_| DeliveryError::DeliveryFailed("lock".to_string()))?;
        sent.push((phone.to_string(), message.to_string()));
        Ok(DeliveryReceipt {
            delivery_id: format!("test-{}", sent.len()),
            phone: phone.to_string(),
            sent_at: Timestamp::from_unix_millis(0),
        })
    }
}

/// Builds an engine over a fresh store plus the recording delivery stub.
fn engine_with_store() -> (TriggerEngine, SharedStore, Arc<RecordingDelivery>) {
    let store = SharedStore::from_store(InMemoryStore::new());
    let delivery = Arc::new(RecordingDelivery::default());
    let engine = TriggerEngine::new(store.clone(), delivery.clone());
    (engine, store, delivery)
}

/// Creates a primary contact on the provided store.
fn seed_primary(store: &SharedStore) -> Result<String, String> {
    let contact = store
        .create_contact(ContactDraft {
            name: "Primary".to_string(),
            phone: "+923001234567".to_string(),
            relationship: Some("Family".to_string()),
            is_primary: Some(true),
            is_active: Some(true),
        })
        .map_err(|err| err.to_string())?;
    Ok(contact.phone)
}

/// Tests that triggering without a primary fails with no side effects.
#[tokio::test]
async fn trigger_without_primary_contact_fails_and_creates_no_alert() -> TestResult {
    let (engine, store, delivery) = engine_with_store();
    match engine.trigger(Some(1.0), Some(2.0)).await {
        Err(TriggerError::NoPrimaryContact) => {}
        Err(other) => return Err(format!("unexpected error: {other}")),
        Ok(_) => return Err("expected the trigger to fail".to_string()),
    }
    let alerts = store.alerts().map_err(|err| err.to_string())?;
    if !alerts.is_empty() {
        return Err("no alert record may be created without a primary contact".to_string());
    }
    let sent = delivery.sent.lock().map_err(|_| "lock".to_string())?;
    if !sent.is_empty() {
        return Err("no delivery may happen without a primary contact".to_string());
    }
    Ok(())
}

/// Tests the full trigger path with coordinates and one delivery.
#[tokio::test]
async fn trigger_with_coordinates_embeds_map_link_and_notifies_primary() -> TestResult {
    let (engine, store, delivery) = engine_with_store();
    let primary_phone = seed_primary(&store)?;
    let response =
        engine.trigger(Some(12.34), Some(56.78)).await.map_err(|err| err.to_string())?;
    if !response.success || !response.sms_sent {
        return Err("expected a successful trigger".to_string());
    }
    if response.alert.latitude.as_deref() != Some("12.34")
        || response.alert.longitude.as_deref() != Some("56.78")
    {
        return Err("coordinates not persisted on the alert".to_string());
    }
    if response.alert.contacts_notified != Some(vec![primary_phone.clone()]) {
        return Err("contacts_notified must be exactly the primary phone".to_string());
    }
    let sent = delivery.sent.lock().map_err(|_| "lock".to_string())?;
    let (phone, message) =
        sent.first().ok_or_else(|| "expected one delivered message".to_string())?;
    if phone != &primary_phone {
        return Err(format!("delivered to {phone}, expected {primary_phone}"));
    }
    if !message.contains("https://maps.google.com/maps?q=12.34,56.78") {
        return Err(format!("message lacks the map link: {message}"));
    }
    Ok(())
}

/// Tests that absent coordinates produce the unavailable marker.
#[tokio::test]
async fn trigger_without_coordinates_marks_location_unavailable() -> TestResult {
    let (engine, store, delivery) = engine_with_store();
    seed_primary(&store)?;
    let response = engine.trigger(None, None).await.map_err(|err| err.to_string())?;
    if response.alert.latitude.is_some() || response.alert.longitude.is_some() {
        return Err("absent coordinates must persist as nulls".to_string());
    }
    let sent = delivery.sent.lock().map_err(|_| "lock".to_string())?;
    let (_, message) =
        sent.first().ok_or_else(|| "expected one delivered message".to_string())?;
    if !message.contains("Location unavailable") {
        return Err(format!("message lacks the unavailable marker: {message}"));
    }
    Ok(())
}

/// Tests map-link formatting and the partial-coordinate fallback.
#[test]
fn location_reference_requires_both_coordinates() -> TestResult {
    if location_reference(Some(12.34), None) != "Location unavailable" {
        return Err("latitude alone must not produce a map link".to_string());
    }
    if location_reference(Some(12.34), Some(56.78)) != "https://maps.google.com/maps?q=12.34,56.78"
    {
        return Err("map link formatting changed".to_string());
    }
    Ok(())
}
