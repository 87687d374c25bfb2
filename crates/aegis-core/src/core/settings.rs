// crates/aegis-core/src/core/settings.rs
// ============================================================================
// Module: Aegis App Settings
// Description: Application settings singleton and partial updates.
// Purpose: Model feature toggles and the emergency message template.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Exactly one settings record exists for the process lifetime. It is
//! initialized with defaults at store construction, mutated by partial
//! patch, and never deleted. No flag-combination validation is applied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default emergency message template.
pub const DEFAULT_EMERGENCY_MESSAGE: &str = "Emergency! I need help. My location:";

// ============================================================================
// SECTION: Settings Record
// ============================================================================

/// Application settings singleton.
///
/// # Invariants
/// - Exactly one instance exists per store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Whether shake-to-trigger detection is enabled on the client.
    pub shake_detection_enabled: bool,
    /// Whether audio capture runs during an alert.
    pub audio_recording_enabled: bool,
    /// Whether the client attempts flashlight activation.
    pub flashlight_enabled: bool,
    /// Whether the client plays a siren.
    pub siren_enabled: bool,
    /// Message template prepended to the location reference.
    pub emergency_message: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            shake_detection_enabled: true,
            audio_recording_enabled: true,
            flashlight_enabled: true,
            siren_enabled: true,
            emergency_message: DEFAULT_EMERGENCY_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Patch
// ============================================================================

/// Partial update for application settings.
///
/// # Invariants
/// - Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// Replacement shake-detection flag.
    #[serde(default)]
    pub shake_detection_enabled: Option<bool>,
    /// Replacement audio-recording flag.
    #[serde(default)]
    pub audio_recording_enabled: Option<bool>,
    /// Replacement flashlight flag.
    #[serde(default)]
    pub flashlight_enabled: Option<bool>,
    /// Replacement siren flag.
    #[serde(default)]
    pub siren_enabled: Option<bool>,
    /// Replacement emergency message template.
    #[serde(default)]
    pub emergency_message: Option<String>,
}
