// crates/aegis-notify/src/lib.rs
// ============================================================================
// Module: Aegis Notify
// Description: Delivery implementations for the core SmsDelivery interface.
// Purpose: Provide simulated, channel, and callback delivery backends.
// Dependencies: aegis-core, async-trait, tokio
// ============================================================================

//! ## Overview
//! Aegis carries no real SMS or telephony integration; every delivery
//! backend here fabricates a successful receipt. [`SimulatedSms`] adds the
//! artificial delay the product simulates, [`ChannelSms`] lets tests observe
//! deliveries over a Tokio channel, and [`CallbackSms`] hands each delivery
//! to a closure.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod callback;
pub mod channel;
pub mod simulated;

pub use callback::CallbackSms;
pub use callback::SmsCallback;
pub use channel::ChannelSms;
pub use channel::SmsMessage;
pub use simulated::SimulatedSms;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use aegis_core::DeliveryReceipt;
use aegis_core::Timestamp;

// ============================================================================
// SECTION: Receipt Helpers
// ============================================================================

/// Builds monotonically identified delivery receipts.
#[derive(Debug)]
pub(crate) struct ReceiptFactory {
    /// Backend name embedded in delivery ids.
    backend: String,
    /// Monotonic counter used for delivery ids.
    counter: AtomicU64,
}

impl ReceiptFactory {
    /// Creates a receipt factory with the provided backend name.
    pub(crate) fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Returns the next receipt for the provided phone number.
    pub(crate) fn next(&self, phone: &str) -> DeliveryReceipt {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        DeliveryReceipt {
            delivery_id: format!("{}-{}", self.backend, seq),
            phone: phone.to_string(),
            sent_at: Timestamp::now(),
        }
    }
}
