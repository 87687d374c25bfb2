// crates/aegis-core/tests/proptest_store.rs
// ============================================================================
// Module: Safety Store Property-Based Tests
// Description: Property tests for contact listing invariants.
// Purpose: Detect listing violations across arbitrary create/delete sequences.
// ============================================================================

//! Property-based tests for the active-contact listing invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use aegis_core::ContactDraft;
use aegis_core::ContactId;
use aegis_core::InMemoryStore;
use aegis_core::SafetyStore;
use proptest::prelude::*;

/// Store operation applied during a property run.
#[derive(Debug, Clone)]
enum Op {
    /// Create a contact with the given primary/active flags.
    Create {
        /// Primary flag for the draft.
        is_primary: bool,
        /// Active flag for the draft.
        is_active: bool,
    },
    /// Delete the contact with the given raw id (may be absent).
    Delete(u64),
}

/// Strategy producing a weighted mix of create and delete operations.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), any::<bool>()).prop_map(|(is_primary, is_active)| Op::Create {
            is_primary,
            is_active,
        }),
        (1_u64 .. 64).prop_map(Op::Delete),
    ]
}

proptest! {
    /// Checks listing bounds across arbitrary create/delete sequences.
    #[test]
    fn listing_never_exceeds_live_count_and_never_shows_inactive(
        ops in prop::collection::vec(op_strategy(), 0 .. 48)
    ) {
        let store = InMemoryStore::new();
        let mut created = 0_u64;
        let mut deleted = 0_u64;
        for op in ops {
            match op {
                Op::Create { is_primary, is_active } => {
                    store
                        .create_contact(ContactDraft {
                            name: "Contact".to_string(),
                            phone: "+12025550100".to_string(),
                            relationship: None,
                            is_primary: Some(is_primary),
                            is_active: Some(is_active),
                        })
                        .unwrap();
                    created += 1;
                }
                Op::Delete(raw) => {
                    let id = ContactId::from_raw(raw).unwrap();
                    if store.delete_contact(id).unwrap() {
                        deleted += 1;
                    }
                }
            }
            let listed = store.contacts().unwrap();
            prop_assert!(listed.len() as u64 <= created - deleted);
            prop_assert!(listed.iter().all(|contact| contact.is_active));
        }
    }
}
