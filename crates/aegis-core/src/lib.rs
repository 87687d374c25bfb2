// crates/aegis-core/src/lib.rs
// ============================================================================
// Module: Aegis Core
// Description: Data model, safety store, delivery interfaces, and trigger workflow.
// Purpose: Provide the backend-agnostic core of the Aegis alerting service.
// Dependencies: async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! Aegis Core defines the canonical data model for emergency contacts,
//! alerts, and application settings, the in-memory safety store that owns
//! them, the delivery interface used to notify contacts, and the emergency
//! trigger workflow that ties these together. Hosts (HTTP server, CLI,
//! clients) compose these pieces; the core never binds to a transport.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;
pub mod store;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use self::core::alert::AlertDraft;
pub use self::core::alert::AlertPatch;
pub use self::core::alert::EmergencyAlert;
pub use self::core::alert::alert_status;
pub use self::core::contact::ContactDraft;
pub use self::core::contact::ContactPatch;
pub use self::core::contact::EmergencyContact;
pub use self::core::identifiers::AlertId;
pub use self::core::identifiers::ContactId;
pub use self::core::phone::PhoneError;
pub use self::core::phone::validate_e164;
pub use self::core::settings::AppSettings;
pub use self::core::settings::SettingsPatch;
pub use self::core::time::Timestamp;
pub use interfaces::DeliveryError;
pub use interfaces::DeliveryReceipt;
pub use interfaces::SafetyStore;
pub use interfaces::SmsDelivery;
pub use interfaces::StoreError;
pub use runtime::trigger::EmergencyResponse;
pub use runtime::trigger::TriggerEngine;
pub use runtime::trigger::TriggerError;
pub use runtime::trigger::location_reference;
pub use store::InMemoryStore;
pub use store::SharedStore;
