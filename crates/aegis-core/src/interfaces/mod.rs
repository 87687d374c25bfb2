// crates/aegis-core/src/interfaces/mod.rs
// ============================================================================
// Module: Aegis Interfaces
// Description: Backend-agnostic interfaces for storage and alert delivery.
// Purpose: Define the contract surfaces used by the Aegis trigger workflow.
// Dependencies: crate::core, async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Aegis integrates with storage and outbound
//! notification without embedding backend-specific details. The only
//! delivery implementations in this repository are simulated; the trait
//! boundary exists so a real SMS gateway can replace them without touching
//! the workflow.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::alert::AlertDraft;
use crate::core::alert::AlertPatch;
use crate::core::alert::EmergencyAlert;
use crate::core::contact::ContactDraft;
use crate::core::contact::ContactPatch;
use crate::core::contact::EmergencyContact;
use crate::core::identifiers::AlertId;
use crate::core::identifiers::ContactId;
use crate::core::settings::AppSettings;
use crate::core::settings::SettingsPatch;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Safety store errors.
///
/// # Invariants
/// - Absent records are signaled through `Option`, never through errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store lock was poisoned by a panicking writer.
    #[error("safety store lock poisoned")]
    Poisoned,
    /// Identifier counter can no longer be advanced.
    #[error("safety store identifier space exhausted")]
    IdSpaceExhausted,
}

// ============================================================================
// SECTION: Safety Store
// ============================================================================

/// Storage surface for contacts, alerts, and the settings singleton.
///
/// Mutation only happens through these operations; callers receive clones.
pub trait SafetyStore: Send + Sync {
    /// Lists active contacts in insertion (id) order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn contacts(&self) -> Result<Vec<EmergencyContact>, StoreError>;

    /// Returns a contact by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn contact(&self, id: ContactId) -> Result<Option<EmergencyContact>, StoreError>;

    /// Returns the first active primary contact in insertion order.
    ///
    /// Duplicate primary flags are not rejected at write time; this lookup
    /// deliberately resolves them to the earliest match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn primary_contact(&self) -> Result<Option<EmergencyContact>, StoreError>;

    /// Creates a contact, assigning the next id and applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable or ids are exhausted.
    fn create_contact(&self, draft: ContactDraft) -> Result<EmergencyContact, StoreError>;

    /// Applies a partial update; `Ok(None)` when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn update_contact(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Option<EmergencyContact>, StoreError>;

    /// Deletes a contact; returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn delete_contact(&self, id: ContactId) -> Result<bool, StoreError>;

    /// Lists all alerts in insertion (id) order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn alerts(&self) -> Result<Vec<EmergencyAlert>, StoreError>;

    /// Creates an alert, assigning the next id and applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable or ids are exhausted.
    fn create_alert(&self, draft: AlertDraft) -> Result<EmergencyAlert, StoreError>;

    /// Applies a partial update; `Ok(None)` when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn update_alert(
        &self,
        id: AlertId,
        patch: AlertPatch,
    ) -> Result<Option<EmergencyAlert>, StoreError>;

    /// Returns the settings singleton.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn settings(&self) -> Result<AppSettings, StoreError>;

    /// Applies a partial update and returns the updated singleton.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn update_settings(&self, patch: SettingsPatch) -> Result<AppSettings, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Delivery
// ============================================================================

/// Delivery errors for outbound notifications.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Delivery backend reported an error.
    #[error("sms delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Receipt returned by a successful delivery.
///
/// # Invariants
/// - `delivery_id` is unique per delivery implementation instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    /// Implementation-scoped delivery identifier.
    pub delivery_id: String,
    /// Destination phone number.
    pub phone: String,
    /// Delivery timestamp.
    pub sent_at: Timestamp,
}

/// Outbound SMS delivery capability.
///
/// Implementations in this repository are simulated; a real gateway slots in
/// behind the same surface.
#[async_trait]
pub trait SmsDelivery: Send + Sync {
    /// Delivers a message to a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when delivery fails.
    async fn send(&self, phone: &str, message: &str) -> Result<DeliveryReceipt, DeliveryError>;
}
