// crates/aegis-notify/tests/delivery.rs
// ============================================================================
// Module: Delivery Backend Tests
// Description: Validate simulated, channel, and callback delivery behavior.
// Purpose: Ensure receipts, delays, and message propagation work as specified.
// Dependencies: aegis-core, aegis-notify, tokio
// ============================================================================

//! Delivery backend tests covering receipts and message propagation.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use aegis_core::SmsDelivery;
use aegis_notify::CallbackSms;
use aegis_notify::ChannelSms;
use aegis_notify::SimulatedSms;

/// Test result alias keeping assertions free of panics.
type TestResult = Result<(), String>;

/// Tests that simulated delivery always succeeds after its delay.
#[tokio::test]
async fn simulated_delivery_waits_then_reports_success() -> TestResult {
    let delivery = SimulatedSms::new(Duration::from_millis(25));
    let started = Instant::now();
    let receipt =
        delivery.send("+12025550100", "test message").await.map_err(|err| err.to_string())?;
    if started.elapsed() < Duration::from_millis(25) {
        return Err("simulated delay was not applied".to_string());
    }
    if receipt.phone != "+12025550100" || receipt.delivery_id != "simulated-1" {
        return Err(format!("unexpected receipt {}", receipt.delivery_id));
    }
    let second = delivery.send("+12025550100", "again").await.map_err(|err| err.to_string())?;
    if second.delivery_id != "simulated-2" {
        return Err("delivery ids must be monotonic".to_string());
    }
    Ok(())
}

/// Tests that channel delivery forwards one message per send.
#[tokio::test]
async fn channel_delivery_enqueues_exactly_one_message() -> TestResult {
    let (tx, mut rx) = tokio::sync::mpsc::channel(4);
    let delivery = ChannelSms::new(tx);
    let receipt = delivery.send("+12025550101", "hello").await.map_err(|err| err.to_string())?;
    let envelope = rx.try_recv().map_err(|err| err.to_string())?;
    if envelope.phone != "+12025550101" || envelope.message != "hello" {
        return Err("delivered message does not match input".to_string());
    }
    if envelope.receipt != receipt {
        return Err("enqueued receipt must match the returned receipt".to_string());
    }
    if rx.try_recv().is_ok() {
        return Err("exactly one message must be enqueued per send".to_string());
    }
    Ok(())
}

/// Tests that callback delivery invokes the closure once per send.
#[tokio::test]
async fn callback_delivery_invokes_closure_per_send() -> TestResult {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let delivery = CallbackSms::new(Box::new(move |phone, message| {
        if let Ok(mut entries) = sink.lock() {
            entries.push((phone.to_string(), message.to_string()));
        }
    }));
    delivery.send("+12025550102", "one").await.map_err(|err| err.to_string())?;
    delivery.send("+12025550103", "two").await.map_err(|err| err.to_string())?;
    let entries = seen.lock().map_err(|_| "lock".to_string())?;
    if entries.len() != 2 || entries[0].1 != "one" || entries[1].0 != "+12025550103" {
        return Err(format!("unexpected callback log of {} entries", entries.len()));
    }
    Ok(())
}

/// Tests that channel delivery fails once the receiver is gone.
#[tokio::test]
async fn channel_delivery_fails_closed_when_receiver_dropped() -> TestResult {
    let (tx, rx) = tokio::sync::mpsc::channel(1);
    drop(rx);
    let delivery = ChannelSms::with_backend(tx, "audit");
    if delivery.send("+12025550104", "lost").await.is_ok() {
        return Err("delivery into a closed channel must fail".to_string());
    }
    Ok(())
}
