// crates/aegis-notify/src/simulated.rs
// ============================================================================
// Module: Simulated SMS Delivery
// Description: Delay-then-succeed delivery standing in for a real gateway.
// Purpose: Fabricate successful-send receipts after an artificial delay.
// Dependencies: aegis-core, async-trait, tokio
// ============================================================================

//! ## Overview
//! [`SimulatedSms`] sleeps for a configured delay and then reports success.
//! It never fails, which is why the trigger workflow defines no retry
//! policy; swapping in a real gateway replaces this type, not the workflow.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use aegis_core::DeliveryError;
use aegis_core::DeliveryReceipt;
use aegis_core::SmsDelivery;
use async_trait::async_trait;

use crate::ReceiptFactory;

// ============================================================================
// SECTION: Simulated Delivery
// ============================================================================

/// Simulated SMS delivery with an artificial send delay.
///
/// # Invariants
/// - Delivery always succeeds after the configured delay.
#[derive(Debug)]
pub struct SimulatedSms {
    /// Artificial delay applied before reporting success.
    delay: Duration,
    /// Receipt factory for delivery ids.
    receipts: ReceiptFactory,
}

impl SimulatedSms {
    /// Creates a simulated delivery backend with the provided delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            receipts: ReceiptFactory::new("simulated"),
        }
    }
}

#[async_trait]
impl SmsDelivery for SimulatedSms {
    async fn send(&self, phone: &str, _message: &str) -> Result<DeliveryReceipt, DeliveryError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.receipts.next(phone))
    }
}
