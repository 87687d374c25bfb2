// crates/aegis-core/src/core/alert.rs
// ============================================================================
// Module: Aegis Emergency Alerts
// Description: Emergency alert records, drafts, and patches.
// Purpose: Model the alert log appended by trigger and CRUD operations.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! Alerts are append-on-create and patch-on-update; no delete operation
//! exists, so alert records are permanent for the process lifetime.
//! `status` is deliberately a free-form string at the data layer (the known
//! values live in [`alert_status`]); closing it into an enum would change
//! wire behavior for clients that write other labels.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AlertId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Status Labels
// ============================================================================

/// Known alert status labels.
pub mod alert_status {
    /// Alert is active and awaiting resolution.
    pub const ACTIVE: &str = "active";
    /// Alert was cancelled by the user.
    pub const CANCELLED: &str = "cancelled";
    /// Alert was resolved.
    pub const RESOLVED: &str = "resolved";
}

// ============================================================================
// SECTION: Alert Record
// ============================================================================

/// Emergency alert record owned by the safety store.
///
/// # Invariants
/// - `id` is store-assigned, 1-based, and monotonic across creations.
/// - `timestamp` is stamped by the store at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    /// Store-assigned alert identifier.
    pub id: AlertId,
    /// Latitude as a decimal string, when known.
    pub latitude: Option<String>,
    /// Longitude as a decimal string, when known.
    pub longitude: Option<String>,
    /// Creation timestamp stamped by the store.
    pub timestamp: Timestamp,
    /// Path to a captured audio recording, when one exists.
    pub audio_recording_path: Option<String>,
    /// Alert status label; defaults to [`alert_status::ACTIVE`].
    pub status: String,
    /// Phone numbers notified for this alert, once delivery was attempted.
    pub contacts_notified: Option<Vec<String>>,
}

// ============================================================================
// SECTION: Drafts and Patches
// ============================================================================

/// Creation input for an emergency alert.
///
/// # Invariants
/// - Unset optional fields persist as nulls on the created record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDraft {
    /// Latitude as a decimal string.
    #[serde(default)]
    pub latitude: Option<String>,
    /// Longitude as a decimal string.
    #[serde(default)]
    pub longitude: Option<String>,
    /// Path to a captured audio recording.
    #[serde(default)]
    pub audio_recording_path: Option<String>,
    /// Status label; defaults to [`alert_status::ACTIVE`] when absent.
    #[serde(default)]
    pub status: Option<String>,
    /// Phone numbers notified for this alert.
    #[serde(default)]
    pub contacts_notified: Option<Vec<String>>,
}

/// Partial update for an emergency alert.
///
/// # Invariants
/// - Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPatch {
    /// Replacement latitude string.
    #[serde(default)]
    pub latitude: Option<String>,
    /// Replacement longitude string.
    #[serde(default)]
    pub longitude: Option<String>,
    /// Replacement audio recording path.
    #[serde(default)]
    pub audio_recording_path: Option<String>,
    /// Replacement status label.
    #[serde(default)]
    pub status: Option<String>,
    /// Replacement notified-phone list.
    #[serde(default)]
    pub contacts_notified: Option<Vec<String>>,
}
