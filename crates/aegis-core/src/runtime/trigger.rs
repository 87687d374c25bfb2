// crates/aegis-core/src/runtime/trigger.rs
// ============================================================================
// Module: Aegis Trigger Workflow
// Description: Emergency trigger orchestration over store and delivery.
// Purpose: Record an alert and notify the primary contact on trigger.
// Dependencies: crate::core, crate::interfaces, crate::store, serde, thiserror
// ============================================================================

//! ## Overview
//! [`TriggerEngine`] implements the alerting sequence: resolve the primary
//! contact, persist an alert record with the caller's coordinates, compose a
//! message embedding a location reference, and hand the message to the
//! delivery interface. The broadcast is best-effort: no durability, no
//! retries. Failing to find a primary contact aborts before any alert
//! record is created.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::alert::AlertDraft;
use crate::core::alert::EmergencyAlert;
use crate::core::alert::alert_status;
use crate::core::contact::EmergencyContact;
use crate::interfaces::DeliveryError;
use crate::interfaces::SafetyStore;
use crate::interfaces::SmsDelivery;
use crate::interfaces::StoreError;
use crate::store::SharedStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Marker used when no coordinates are available.
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

/// Response message reported after a successful trigger.
const TRIGGER_SUCCESS_MESSAGE: &str = "Emergency alert sent to primary contact";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Trigger workflow errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// No active primary contact is configured.
    #[error("no primary contact configured")]
    NoPrimaryContact,
    /// Safety store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Delivery failure.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// Result of a successful emergency trigger.
///
/// # Invariants
/// - `alert.contacts_notified` contains exactly the primary contact's phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyResponse {
    /// Success flag for the client.
    pub success: bool,
    /// Created alert record.
    pub alert: EmergencyAlert,
    /// Primary contact that was notified.
    pub primary_contact: EmergencyContact,
    /// Whether the simulated SMS was sent.
    pub sms_sent: bool,
    /// Human-readable outcome message.
    pub message: String,
}

// ============================================================================
// SECTION: Location Reference
// ============================================================================

/// Builds the location reference embedded in alert messages.
///
/// With both coordinates present this is a map link; otherwise the literal
/// [`LOCATION_UNAVAILABLE`] marker.
#[must_use]
pub fn location_reference(latitude: Option<f64>, longitude: Option<f64>) -> String {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => {
            format!("https://maps.google.com/maps?q={lat},{lng}")
        }
        _ => LOCATION_UNAVAILABLE.to_string(),
    }
}

/// Composes the emergency message embedding a location reference.
fn compose_message(location: &str) -> String {
    format!(
        "EMERGENCY ALERT: I need help! My current location: {location}. Please contact me \
         immediately or call emergency services."
    )
}

// ============================================================================
// SECTION: Trigger Engine
// ============================================================================

/// Emergency trigger workflow over a shared store and delivery capability.
pub struct TriggerEngine {
    /// Store holding contacts and the alert log.
    store: SharedStore,
    /// Outbound delivery capability.
    delivery: Arc<dyn SmsDelivery>,
}

impl TriggerEngine {
    /// Creates a trigger engine.
    #[must_use]
    pub fn new(store: SharedStore, delivery: Arc<dyn SmsDelivery>) -> Self {
        Self {
            store,
            delivery,
        }
    }

    /// Executes the emergency trigger sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NoPrimaryContact`] when no active primary
    /// contact exists (no alert record is created), or the underlying store
    /// or delivery error otherwise.
    pub async fn trigger(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<EmergencyResponse, TriggerError> {
        let primary = self.store.primary_contact()?.ok_or(TriggerError::NoPrimaryContact)?;
        let alert = self.store.create_alert(AlertDraft {
            latitude: latitude.map(|value| value.to_string()),
            longitude: longitude.map(|value| value.to_string()),
            audio_recording_path: None,
            status: Some(alert_status::ACTIVE.to_string()),
            contacts_notified: Some(vec![primary.phone.clone()]),
        })?;
        let location = location_reference(latitude, longitude);
        let message = compose_message(&location);
        self.delivery.send(&primary.phone, &message).await?;
        Ok(EmergencyResponse {
            success: true,
            alert,
            primary_contact: primary,
            sms_sent: true,
            message: TRIGGER_SUCCESS_MESSAGE.to_string(),
        })
    }
}
