// crates/aegis-core/src/core/contact.rs
// ============================================================================
// Module: Aegis Emergency Contacts
// Description: Emergency contact records, drafts, and patches.
// Purpose: Model the contacts a user registers to receive automated alerts.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! Contact records serialize with camelCase field names to preserve the
//! wire shapes consumed by the Aegis mobile client. The primary flag marks
//! the contact that receives the first automated alert; the store does not
//! enforce primary exclusivity, it returns the first active primary match.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ContactId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Contact Record
// ============================================================================

/// Emergency contact record owned by the safety store.
///
/// # Invariants
/// - `id` is store-assigned, 1-based, and monotonic across creations.
/// - `phone` was validated as E.164 at the boundary before creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    /// Store-assigned contact identifier.
    pub id: ContactId,
    /// Display name of the contact.
    pub name: String,
    /// E.164 phone number.
    pub phone: String,
    /// Optional relationship label (family, friend, ...).
    pub relationship: Option<String>,
    /// Whether this contact receives the first automated alert.
    pub is_primary: bool,
    /// Whether this contact is active; inactive contacts are hidden from listings.
    pub is_active: bool,
    /// Creation timestamp stamped by the store.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Drafts and Patches
// ============================================================================

/// Creation input for an emergency contact.
///
/// # Invariants
/// - `phone` must be validated at the boundary before the store sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    /// Display name of the contact.
    pub name: String,
    /// E.164 phone number.
    pub phone: String,
    /// Optional relationship label; defaults to absent.
    #[serde(default)]
    pub relationship: Option<String>,
    /// Primary flag; defaults to false when absent.
    #[serde(default)]
    pub is_primary: Option<bool>,
    /// Active flag; defaults to true when absent.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial update for an emergency contact.
///
/// # Invariants
/// - Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    /// Replacement display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement phone number (validated at the boundary).
    #[serde(default)]
    pub phone: Option<String>,
    /// Replacement relationship label.
    #[serde(default)]
    pub relationship: Option<String>,
    /// Replacement primary flag.
    #[serde(default)]
    pub is_primary: Option<bool>,
    /// Replacement active flag.
    #[serde(default)]
    pub is_active: Option<bool>,
}
