// crates/aegis-notify/src/callback.rs
// ============================================================================
// Module: Callback SMS Delivery
// Description: Closure-backed delivery for embedding hosts.
// Purpose: Hand each delivered message to a caller-provided closure.
// Dependencies: aegis-core, async-trait
// ============================================================================

//! ## Overview
//! [`CallbackSms`] invokes a closure per delivery. Hosts use it to surface
//! simulated sends in their own UI or logs without a channel.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aegis_core::DeliveryError;
use aegis_core::DeliveryReceipt;
use aegis_core::SmsDelivery;
use async_trait::async_trait;

use crate::ReceiptFactory;

// ============================================================================
// SECTION: Callback Delivery
// ============================================================================

/// Callback type invoked with (phone, message) per delivery.
pub type SmsCallback = Box<dyn Fn(&str, &str) + Send + Sync>;

/// Closure-backed SMS delivery.
///
/// # Invariants
/// - The callback runs exactly once per successful delivery.
pub struct CallbackSms {
    /// Callback invoked per delivery.
    callback: SmsCallback,
    /// Receipt factory for delivery ids.
    receipts: ReceiptFactory,
}

impl CallbackSms {
    /// Creates a callback delivery backend.
    #[must_use]
    pub fn new(callback: SmsCallback) -> Self {
        Self {
            callback,
            receipts: ReceiptFactory::new("callback"),
        }
    }
}

#[async_trait]
impl SmsDelivery for CallbackSms {
    async fn send(&self, phone: &str, message: &str) -> Result<DeliveryReceipt, DeliveryError> {
        (self.callback)(phone, message);
        Ok(self.receipts.next(phone))
    }
}
