// crates/aegis-notify/src/channel.rs
// ============================================================================
// Module: Channel SMS Delivery
// Description: Channel-based delivery for asynchronous observation.
// Purpose: Send delivered messages through a Tokio mpsc channel.
// Dependencies: aegis-core, async-trait, tokio
// ============================================================================

//! ## Overview
//! [`ChannelSms`] delivers by enqueuing one [`SmsMessage`] per send on a
//! `tokio::sync::mpsc` channel. Tests and auditing receivers consume the
//! channel to observe exactly what was delivered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aegis_core::DeliveryError;
use aegis_core::DeliveryReceipt;
use aegis_core::SmsDelivery;
use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::ReceiptFactory;

// ============================================================================
// SECTION: Delivery Message
// ============================================================================

/// Message emitted by channel-based delivery.
///
/// # Invariants
/// - `receipt` corresponds to the provided `phone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Destination phone number.
    pub phone: String,
    /// Delivered message body.
    pub message: String,
    /// Delivery receipt.
    pub receipt: DeliveryReceipt,
}

// ============================================================================
// SECTION: Channel Delivery
// ============================================================================

/// Channel-based SMS delivery.
///
/// # Invariants
/// - Each successful delivery enqueues exactly one [`SmsMessage`].
#[derive(Debug)]
pub struct ChannelSms {
    /// Sender used to enqueue delivered messages.
    sender: Sender<SmsMessage>,
    /// Receipt factory for delivery ids.
    receipts: ReceiptFactory,
}

impl ChannelSms {
    /// Creates a channel delivery backend with the default backend name.
    #[must_use]
    pub fn new(sender: Sender<SmsMessage>) -> Self {
        Self {
            sender,
            receipts: ReceiptFactory::new("channel"),
        }
    }

    /// Creates a channel delivery backend with a custom backend name.
    #[must_use]
    pub fn with_backend(sender: Sender<SmsMessage>, backend: impl Into<String>) -> Self {
        Self {
            sender,
            receipts: ReceiptFactory::new(backend),
        }
    }
}

#[async_trait]
impl SmsDelivery for ChannelSms {
    async fn send(&self, phone: &str, message: &str) -> Result<DeliveryReceipt, DeliveryError> {
        let receipt = self.receipts.next(phone);
        let envelope = SmsMessage {
            phone: phone.to_string(),
            message: message.to_string(),
            receipt: receipt.clone(),
        };
        self.sender
            .send(envelope)
            .await
            .map_err(|err| DeliveryError::DeliveryFailed(err.to_string()))?;
        Ok(receipt)
    }
}
