// crates/aegis-core/tests/store.rs
// ============================================================================
// Module: Safety Store Tests
// Description: Validate contact, alert, and settings store semantics.
// Purpose: Ensure listings, defaults, and partial patches behave as specified.
// Dependencies: aegis-core
// ============================================================================

//! Store behavior tests for listings, primary lookup, and partial patches.

use aegis_core::AlertDraft;
use aegis_core::AlertId;
use aegis_core::AlertPatch;
use aegis_core::ContactDraft;
use aegis_core::ContactId;
use aegis_core::ContactPatch;
use aegis_core::InMemoryStore;
use aegis_core::SafetyStore;
use aegis_core::SettingsPatch;
use aegis_core::alert_status;

/// Test result alias keeping assertions free of panics.
type TestResult = Result<(), String>;

/// Builds a contact draft with the provided name and primary flag.
fn draft(name: &str, phone: &str, is_primary: bool) -> ContactDraft {
    ContactDraft {
        name: name.to_string(),
        phone: phone.to_string(),
        relationship: None,
        is_primary: Some(is_primary),
        is_active: None,
    }
}

/// Tests creation defaults and 1-based monotonic id assignment.
#[test]
fn create_applies_defaults_and_assigns_monotonic_ids() -> TestResult {
    let store = InMemoryStore::new();
    let first = store
        .create_contact(ContactDraft {
            name: "Ada".to_string(),
            phone: "+12025550100".to_string(),
            relationship: None,
            is_primary: None,
            is_active: None,
        })
        .map_err(|err| err.to_string())?;
    let second =
        store.create_contact(draft("Grace", "+12025550101", true)).map_err(|err| err.to_string())?;
    if first.id.get() != 1 || second.id.get() != 2 {
        return Err(format!("expected ids 1 and 2, got {} and {}", first.id, second.id));
    }
    if first.is_primary || !first.is_active || first.relationship.is_some() {
        return Err("creation defaults not applied".to_string());
    }
    Ok(())
}

/// Tests that deactivated contacts disappear from listings.
#[test]
fn listing_excludes_inactive_contacts() -> TestResult {
    let store = InMemoryStore::new();
    let kept =
        store.create_contact(draft("Kept", "+12025550102", false)).map_err(|err| err.to_string())?;
    let hidden = store
        .create_contact(draft("Hidden", "+12025550103", false))
        .map_err(|err| err.to_string())?;
    store
        .update_contact(hidden.id, ContactPatch {
            is_active: Some(false),
            ..ContactPatch::default()
        })
        .map_err(|err| err.to_string())?;
    let listed = store.contacts().map_err(|err| err.to_string())?;
    if listed.len() != 1 || listed[0].id != kept.id {
        return Err(format!("expected only the active contact, got {} entries", listed.len()));
    }
    Ok(())
}

/// Tests that the earliest active primary wins the lookup.
#[test]
fn primary_lookup_returns_first_match_in_insertion_order() -> TestResult {
    // Duplicate primary flags are a documented latent behavior: the lookup
    // resolves to the earliest active primary, not the newest.
    let store = InMemoryStore::new();
    store.create_contact(draft("A", "+12025550104", false)).map_err(|err| err.to_string())?;
    let b = store.create_contact(draft("B", "+12025550105", true)).map_err(|err| err.to_string())?;
    store.create_contact(draft("C", "+12025550106", true)).map_err(|err| err.to_string())?;
    let primary = store
        .primary_contact()
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "expected a primary contact".to_string())?;
    if primary.id != b.id {
        return Err(format!("expected contact B ({}) as primary, got {}", b.id, primary.id));
    }
    Ok(())
}

/// Tests that an inactive primary is skipped by the lookup.
#[test]
fn primary_lookup_skips_inactive_primaries() -> TestResult {
    let store = InMemoryStore::new();
    let first =
        store.create_contact(draft("First", "+12025550107", true)).map_err(|err| err.to_string())?;
    let second = store
        .create_contact(draft("Second", "+12025550108", true))
        .map_err(|err| err.to_string())?;
    store
        .update_contact(first.id, ContactPatch {
            is_active: Some(false),
            ..ContactPatch::default()
        })
        .map_err(|err| err.to_string())?;
    let primary = store
        .primary_contact()
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "expected a primary contact".to_string())?;
    if primary.id != second.id {
        return Err("inactive primary should be skipped".to_string());
    }
    Ok(())
}

/// Tests that patching an absent contact returns None.
#[test]
fn update_missing_contact_returns_none() -> TestResult {
    let store = InMemoryStore::new();
    let absent = ContactId::from_raw(42).ok_or_else(|| "id construction failed".to_string())?;
    let result = store
        .update_contact(absent, ContactPatch {
            name: Some("Nobody".to_string()),
            ..ContactPatch::default()
        })
        .map_err(|err| err.to_string())?;
    if result.is_some() {
        return Err("expected absent update to return None".to_string());
    }
    Ok(())
}

/// Tests that delete reports existence exactly once.
#[test]
fn delete_reports_whether_a_record_existed() -> TestResult {
    let store = InMemoryStore::new();
    let contact =
        store.create_contact(draft("Gone", "+12025550109", false)).map_err(|err| err.to_string())?;
    let first = store.delete_contact(contact.id).map_err(|err| err.to_string())?;
    let second = store.delete_contact(contact.id).map_err(|err| err.to_string())?;
    if !first || second {
        return Err("delete should report existence exactly once".to_string());
    }
    Ok(())
}

/// Tests that a bare alert draft defaults to active status.
#[test]
fn alert_create_defaults_status_to_active() -> TestResult {
    let store = InMemoryStore::new();
    let alert = store.create_alert(AlertDraft::default()).map_err(|err| err.to_string())?;
    if alert.status != alert_status::ACTIVE {
        return Err(format!("expected default status active, got {}", alert.status));
    }
    if alert.latitude.is_some() || alert.contacts_notified.is_some() {
        return Err("unset optional fields should persist as nulls".to_string());
    }
    Ok(())
}

/// Tests attaching a notified-phone list without disturbing other fields.
#[test]
fn alert_patch_attaches_contacts_notified() -> TestResult {
    let store = InMemoryStore::new();
    let alert = store.create_alert(AlertDraft::default()).map_err(|err| err.to_string())?;
    let updated = store
        .update_alert(alert.id, AlertPatch {
            contacts_notified: Some(vec!["+12025550110".to_string()]),
            ..AlertPatch::default()
        })
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "expected the alert to exist".to_string())?;
    if updated.contacts_notified != Some(vec!["+12025550110".to_string()]) {
        return Err("contacts_notified patch not applied".to_string());
    }
    if updated.status != alert_status::ACTIVE {
        return Err("patch must not disturb unrelated fields".to_string());
    }
    Ok(())
}

/// Tests that patching an absent alert returns None.
#[test]
fn update_missing_alert_returns_none() -> TestResult {
    let store = InMemoryStore::new();
    let absent = AlertId::from_raw(7).ok_or_else(|| "id construction failed".to_string())?;
    let result = store.update_alert(absent, AlertPatch::default()).map_err(|err| err.to_string())?;
    if result.is_some() {
        return Err("expected absent update to return None".to_string());
    }
    Ok(())
}

/// Tests that a settings patch only touches the named fields.
#[test]
fn settings_patch_leaves_other_fields_unchanged() -> TestResult {
    let store = InMemoryStore::new();
    let before = store.settings().map_err(|err| err.to_string())?;
    let updated = store
        .update_settings(SettingsPatch {
            siren_enabled: Some(false),
            ..SettingsPatch::default()
        })
        .map_err(|err| err.to_string())?;
    if updated.siren_enabled {
        return Err("siren flag should be disabled".to_string());
    }
    if updated.shake_detection_enabled != before.shake_detection_enabled
        || updated.audio_recording_enabled != before.audio_recording_enabled
        || updated.flashlight_enabled != before.flashlight_enabled
        || updated.emergency_message != before.emergency_message
    {
        return Err("unrelated settings fields changed".to_string());
    }
    let reread = store.settings().map_err(|err| err.to_string())?;
    if reread != updated {
        return Err("settings update not visible to the next read".to_string());
    }
    Ok(())
}

/// Tests that sample seeding creates three contacts with a known primary.
#[test]
fn sample_contacts_seed_first_contact_as_primary() -> TestResult {
    let store = InMemoryStore::with_sample_contacts().map_err(|err| err.to_string())?;
    let listed = store.contacts().map_err(|err| err.to_string())?;
    if listed.len() != 3 {
        return Err(format!("expected 3 sample contacts, got {}", listed.len()));
    }
    let primary = store
        .primary_contact()
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "expected a seeded primary contact".to_string())?;
    if primary.phone != "+923001234567" {
        return Err(format!("unexpected seeded primary phone {}", primary.phone));
    }
    Ok(())
}
