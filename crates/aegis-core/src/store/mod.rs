// crates/aegis-core/src/store/mod.rs
// ============================================================================
// Module: Aegis In-Memory Safety Store
// Description: Map-backed store for contacts, alerts, and settings.
// Purpose: Own all entity instances for the process lifetime.
// Dependencies: crate::core, crate::interfaces, std
// ============================================================================

//! ## Overview
//! [`InMemoryStore`] keeps contacts and alerts in `BTreeMap`s keyed by
//! 1-based monotonic ids, plus the settings singleton. All mutation happens
//! under one mutex, so id assignment and map writes stay atomic in a
//! concurrent host. [`SharedStore`] is the cloneable handle injected into
//! request handlers; there is no global store instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::alert::AlertDraft;
use crate::core::alert::AlertPatch;
use crate::core::alert::EmergencyAlert;
use crate::core::alert::alert_status;
use crate::core::contact::ContactDraft;
use crate::core::contact::ContactPatch;
use crate::core::contact::EmergencyContact;
use crate::core::identifiers::AlertId;
use crate::core::identifiers::ContactId;
use crate::core::settings::AppSettings;
use crate::core::settings::SettingsPatch;
use crate::core::time::Timestamp;
use crate::interfaces::SafetyStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Clock used to stamp record creation times.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable store state guarded by the store mutex.
#[derive(Debug)]
struct StoreInner {
    /// Contact records keyed by id.
    contacts: BTreeMap<ContactId, EmergencyContact>,
    /// Alert records keyed by id.
    alerts: BTreeMap<AlertId, EmergencyAlert>,
    /// Settings singleton.
    settings: AppSettings,
    /// Next contact id to assign.
    next_contact_id: u64,
    /// Next alert id to assign.
    next_alert_id: u64,
}

impl StoreInner {
    /// Creates empty store state with default settings.
    fn new() -> Self {
        Self {
            contacts: BTreeMap::new(),
            alerts: BTreeMap::new(),
            settings: AppSettings::default(),
            next_contact_id: 1,
            next_alert_id: 1,
        }
    }
}

/// In-memory safety store.
///
/// # Invariants
/// - Ids are assigned from 1-based monotonic counters and never reused.
/// - Alerts are never deleted.
pub struct InMemoryStore {
    /// Store state behind the single writer lock.
    inner: Mutex<StoreInner>,
    /// Clock used for `created_at` / `timestamp` stamping.
    clock: Clock,
}

impl InMemoryStore {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Timestamp::now))
    }

    /// Creates an empty store with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            inner: Mutex::new(StoreInner::new()),
            clock,
        }
    }

    /// Creates a store pre-populated with the three sample contacts used by
    /// development deployments. The first sample is the primary contact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when seeding fails.
    pub fn with_sample_contacts() -> Result<Self, StoreError> {
        let store = Self::new();
        let samples = [
            ("Primary Contact", "+923001234567", "Family", true),
            ("Secondary Contact", "+919876543210", "Friend", false),
            ("Third Contact", "+15553456789", "Emergency", false),
        ];
        for (name, phone, relationship, is_primary) in samples {
            store.create_contact(ContactDraft {
                name: name.to_string(),
                phone: phone.to_string(),
                relationship: Some(relationship.to_string()),
                is_primary: Some(is_primary),
                is_active: Some(true),
            })?;
        }
        Ok(store)
    }

    /// Locks the store state, converting lock poisoning into a store error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreInner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyStore for InMemoryStore {
    fn contacts(&self) -> Result<Vec<EmergencyContact>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.contacts.values().filter(|contact| contact.is_active).cloned().collect())
    }

    fn contact(&self, id: ContactId) -> Result<Option<EmergencyContact>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.contacts.get(&id).cloned())
    }

    fn primary_contact(&self) -> Result<Option<EmergencyContact>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .contacts
            .values()
            .find(|contact| contact.is_primary && contact.is_active)
            .cloned())
    }

    fn create_contact(&self, draft: ContactDraft) -> Result<EmergencyContact, StoreError> {
        let mut inner = self.lock()?;
        let id = ContactId::from_raw(inner.next_contact_id).ok_or(StoreError::IdSpaceExhausted)?;
        inner.next_contact_id =
            inner.next_contact_id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        let contact = EmergencyContact {
            id,
            name: draft.name,
            phone: draft.phone,
            relationship: draft.relationship,
            is_primary: draft.is_primary.unwrap_or(false),
            is_active: draft.is_active.unwrap_or(true),
            created_at: (self.clock)(),
        };
        inner.contacts.insert(id, contact.clone());
        Ok(contact)
    }

    fn update_contact(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Option<EmergencyContact>, StoreError> {
        let mut inner = self.lock()?;
        let Some(contact) = inner.contacts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            contact.name = name;
        }
        if let Some(phone) = patch.phone {
            contact.phone = phone;
        }
        if let Some(relationship) = patch.relationship {
            contact.relationship = Some(relationship);
        }
        if let Some(is_primary) = patch.is_primary {
            contact.is_primary = is_primary;
        }
        if let Some(is_active) = patch.is_active {
            contact.is_active = is_active;
        }
        Ok(Some(contact.clone()))
    }

    fn delete_contact(&self, id: ContactId) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        Ok(inner.contacts.remove(&id).is_some())
    }

    fn alerts(&self) -> Result<Vec<EmergencyAlert>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.alerts.values().cloned().collect())
    }

    fn create_alert(&self, draft: AlertDraft) -> Result<EmergencyAlert, StoreError> {
        let mut inner = self.lock()?;
        let id = AlertId::from_raw(inner.next_alert_id).ok_or(StoreError::IdSpaceExhausted)?;
        inner.next_alert_id =
            inner.next_alert_id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        let alert = EmergencyAlert {
            id,
            latitude: draft.latitude,
            longitude: draft.longitude,
            timestamp: (self.clock)(),
            audio_recording_path: draft.audio_recording_path,
            status: draft.status.unwrap_or_else(|| alert_status::ACTIVE.to_string()),
            contacts_notified: draft.contacts_notified,
        };
        inner.alerts.insert(id, alert.clone());
        Ok(alert)
    }

    fn update_alert(
        &self,
        id: AlertId,
        patch: AlertPatch,
    ) -> Result<Option<EmergencyAlert>, StoreError> {
        let mut inner = self.lock()?;
        let Some(alert) = inner.alerts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(latitude) = patch.latitude {
            alert.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            alert.longitude = Some(longitude);
        }
        if let Some(path) = patch.audio_recording_path {
            alert.audio_recording_path = Some(path);
        }
        if let Some(status) = patch.status {
            alert.status = status;
        }
        if let Some(notified) = patch.contacts_notified {
            alert.contacts_notified = Some(notified);
        }
        Ok(Some(alert.clone()))
    }

    fn settings(&self) -> Result<AppSettings, StoreError> {
        let inner = self.lock()?;
        Ok(inner.settings.clone())
    }

    fn update_settings(&self, patch: SettingsPatch) -> Result<AppSettings, StoreError> {
        let mut inner = self.lock()?;
        if let Some(enabled) = patch.shake_detection_enabled {
            inner.settings.shake_detection_enabled = enabled;
        }
        if let Some(enabled) = patch.audio_recording_enabled {
            inner.settings.audio_recording_enabled = enabled;
        }
        if let Some(enabled) = patch.flashlight_enabled {
            inner.settings.flashlight_enabled = enabled;
        }
        if let Some(enabled) = patch.siren_enabled {
            inner.settings.siren_enabled = enabled;
        }
        if let Some(message) = patch.emergency_message {
            inner.settings.emergency_message = message;
        }
        Ok(inner.settings.clone())
    }
}

// ============================================================================
// SECTION: Shared Store
// ============================================================================

/// Cloneable handle over a shared safety store.
///
/// # Invariants
/// - All clones observe the same underlying state.
#[derive(Clone)]
pub struct SharedStore {
    /// Shared store implementation.
    store: Arc<dyn SafetyStore>,
}

impl SharedStore {
    /// Wraps a store implementation in a shared handle.
    pub fn from_store(store: impl SafetyStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns the underlying store surface.
    #[must_use]
    pub fn inner(&self) -> &dyn SafetyStore {
        self.store.as_ref()
    }
}

impl SafetyStore for SharedStore {
    fn contacts(&self) -> Result<Vec<EmergencyContact>, StoreError> {
        self.store.contacts()
    }

    fn contact(&self, id: ContactId) -> Result<Option<EmergencyContact>, StoreError> {
        self.store.contact(id)
    }

    fn primary_contact(&self) -> Result<Option<EmergencyContact>, StoreError> {
        self.store.primary_contact()
    }

    fn create_contact(&self, draft: ContactDraft) -> Result<EmergencyContact, StoreError> {
        self.store.create_contact(draft)
    }

    fn update_contact(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Option<EmergencyContact>, StoreError> {
        self.store.update_contact(id, patch)
    }

    fn delete_contact(&self, id: ContactId) -> Result<bool, StoreError> {
        self.store.delete_contact(id)
    }

    fn alerts(&self) -> Result<Vec<EmergencyAlert>, StoreError> {
        self.store.alerts()
    }

    fn create_alert(&self, draft: AlertDraft) -> Result<EmergencyAlert, StoreError> {
        self.store.create_alert(draft)
    }

    fn update_alert(
        &self,
        id: AlertId,
        patch: AlertPatch,
    ) -> Result<Option<EmergencyAlert>, StoreError> {
        self.store.update_alert(id, patch)
    }

    fn settings(&self) -> Result<AppSettings, StoreError> {
        self.store.settings()
    }

    fn update_settings(&self, patch: SettingsPatch) -> Result<AppSettings, StoreError> {
        self.store.update_settings(patch)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.store.readiness()
    }
}
