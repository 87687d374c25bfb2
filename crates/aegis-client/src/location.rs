// crates/aegis-client/src/location.rs
// ============================================================================
// Module: location
// Description: Periodic location sampling behind a provider trait.
// Purpose: Fetch the device position on a fixed interval and publish
//          updates to the alert workflow without blocking it.
// Dependencies: aegis-core, aegis-config, async-trait, tokio
// ============================================================================

//! ## Overview
//!
//! [`LocationTracker`] owns a background task that asks a
//! [`PositionProvider`] for the current position immediately on start and
//! then once per interval, publishing each successful fix over a channel.
//! Failed fixes are skipped; the tracker keeps running and tries again on
//! the next tick. The provider trait keeps real positioning hardware out
//! of this crate and out of the tests.

use aegis_config::ClientConfig;
use aegis_core::Timestamp;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ============================================================================
// SECTION: Provider boundary
// ============================================================================

/// A geographic fix reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Estimated accuracy in meters, when the provider reports one.
    pub accuracy: Option<f64>,
}

/// Constraints passed to the provider for each fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    /// How long the provider may spend acquiring a fix.
    pub timeout: Duration,
    /// Oldest cached fix the provider may return.
    pub maximum_age: Duration,
    /// Whether to request high-accuracy positioning.
    pub high_accuracy: bool,
}

impl PositionOptions {
    /// Builds options from the client configuration section.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.location_timeout_secs),
            maximum_age: Duration::from_secs(config.location_max_age_secs),
            high_accuracy: true,
        }
    }
}

/// Why a position fix could not be produced.
#[derive(Debug, Error)]
pub enum PositionError {
    /// Positioning hardware is absent or powered off.
    #[error("position provider unavailable: {0}")]
    Unavailable(String),
    /// No fix was acquired within the allowed time.
    #[error("position request timed out")]
    Timeout,
    /// The platform refused access to location data.
    #[error("location permission denied")]
    PermissionDenied,
}

/// Source of geographic fixes. Implemented by platform adapters and by
/// in-memory stubs in tests.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Produces the current position subject to `options`.
    ///
    /// # Errors
    /// Returns a [`PositionError`] when no fix can be produced in time.
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, PositionError>;
}

// ============================================================================
// SECTION: Tracker
// ============================================================================

/// One successful fix published by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    /// The fix itself.
    pub position: Position,
    /// When the tracker recorded the fix.
    pub updated_at: Timestamp,
}

/// Fetches the position on a fixed interval and publishes updates.
///
/// # Invariants
/// - The first fetch happens immediately on [`LocationTracker::start`].
/// - A failed fetch never stops the tracker; the next tick retries.
pub struct LocationTracker {
    /// Source of fixes.
    provider: Arc<dyn PositionProvider>,
    /// Gap between scheduled fetches.
    interval: Duration,
    /// Constraints applied to every fetch.
    options: PositionOptions,
    /// Running background task, when started.
    task: Option<JoinHandle<()>>,
    /// Timestamp of the most recent successful fix.
    last_updated: Arc<Mutex<Option<Timestamp>>>,
}

impl LocationTracker {
    /// Builds a tracker with explicit tunables.
    #[must_use]
    pub fn new(
        provider: Arc<dyn PositionProvider>,
        interval: Duration,
        options: PositionOptions,
    ) -> Self {
        Self {
            provider,
            interval,
            options,
            task: None,
            last_updated: Arc::new(Mutex::new(None)),
        }
    }

    /// Builds a tracker from the client configuration section.
    #[must_use]
    pub fn from_config(provider: Arc<dyn PositionProvider>, config: &ClientConfig) -> Self {
        Self::new(
            provider,
            Duration::from_secs(config.location_interval_secs),
            PositionOptions::from_config(config),
        )
    }

    /// Starts the background fetch loop, publishing fixes to `sender`.
    ///
    /// A second call while already tracking is a no-op. The loop exits
    /// on its own once every receiver is dropped.
    pub fn start(&mut self, sender: mpsc::Sender<PositionUpdate>) {
        if self.task.is_some() {
            return;
        }
        let provider = Arc::clone(&self.provider);
        let options = self.options;
        let interval = self.interval;
        let last_updated = Arc::clone(&self.last_updated);
        self.task = Some(tokio::spawn(async move {
            loop {
                if let Ok(position) = provider.current_position(&options).await {
                    let update = PositionUpdate {
                        position,
                        updated_at: Timestamp::now(),
                    };
                    if let Ok(mut slot) = last_updated.lock() {
                        *slot = Some(update.updated_at);
                    }
                    if sender.send(update).await.is_err() {
                        return;
                    }
                }
                tokio::time::sleep(interval).await;
            }
        }));
    }

    /// Stops the background loop. Safe to call when not tracking.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether the background loop is currently running.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.task.is_some()
    }

    /// Timestamp of the most recent successful fix, if any.
    #[must_use]
    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated.lock().ok().and_then(|slot| *slot)
    }

    /// Time remaining until the next scheduled fetch, measured from the
    /// last successful fix. Returns zero once the interval has elapsed
    /// and `None` before the first fix lands.
    #[must_use]
    pub fn time_until_next_update(&self, now: Timestamp) -> Option<Duration> {
        let last = self.last_updated()?;
        let elapsed = now.as_unix_millis().saturating_sub(last.as_unix_millis());
        let elapsed = u64::try_from(elapsed).unwrap_or(0);
        let interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX);
        Some(Duration::from_millis(interval_ms.saturating_sub(elapsed)))
    }
}

impl Drop for LocationTracker {
    fn drop(&mut self) {
        self.stop();
    }
}
