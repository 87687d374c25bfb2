// crates/aegis-client/src/motion.rs
// ============================================================================
// Module: motion
// Description: Shake detection over raw accelerometer samples.
// Purpose: Turn a stream of motion samples into a single shake event once
//          enough vigorous samples land inside the detection window.
// Dependencies: aegis-core, aegis-config
// ============================================================================

//! ## Overview
//!
//! The detector is a pure state machine: callers feed it accelerometer
//! samples with timestamps and it emits at most one [`ShakeEvent`] when the
//! configured number of qualifying samples arrive close enough together.
//! A sample qualifies when the summed absolute acceleration across all
//! three axes exceeds the threshold. The running count resets whenever the
//! gap since the previous qualifying sample exceeds the window, and resets
//! again after each emitted event so a sustained shake fires exactly once.

use aegis_config::ClientConfig;
use aegis_core::Timestamp;
use std::time::Duration;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One accelerometer reading, in m/s^2 per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Acceleration along the X axis.
    pub x: f64,
    /// Acceleration along the Y axis.
    pub y: f64,
    /// Acceleration along the Z axis.
    pub z: f64,
}

impl MotionSample {
    /// Summed absolute acceleration across the three axes.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }
}

/// Emitted once per completed shake gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShakeEvent {
    /// Timestamp of the sample that completed the gesture.
    pub at: Timestamp,
}

// ============================================================================
// SECTION: Detector
// ============================================================================

/// Counts vigorous samples and emits a [`ShakeEvent`] when enough arrive
/// within the detection window.
///
/// # Invariants
/// - A sustained shake emits exactly one event; the count resets on emit.
/// - Qualifying samples separated by more than the window do not accumulate.
#[derive(Debug)]
pub struct ShakeDetector {
    /// Minimum summed magnitude for a sample to qualify.
    threshold: f64,
    /// Qualifying samples required to emit an event.
    trigger_count: u32,
    /// Maximum gap between consecutive qualifying samples.
    window: Duration,
    /// Qualifying samples seen in the current burst.
    count: u32,
    /// Timestamp of the most recent qualifying sample.
    last_qualifying: Option<Timestamp>,
}

impl ShakeDetector {
    /// Builds a detector with explicit tunables.
    #[must_use]
    pub fn new(threshold: f64, trigger_count: u32, window: Duration) -> Self {
        Self {
            threshold,
            trigger_count,
            window,
            count: 0,
            last_qualifying: None,
        }
    }

    /// Builds a detector from the client configuration section.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.shake_threshold,
            config.shake_trigger_count,
            Duration::from_millis(config.shake_window_ms),
        )
    }

    /// Feeds one sample into the detector.
    ///
    /// Returns a [`ShakeEvent`] when this sample completes the gesture.
    /// Samples below the threshold are ignored; they neither advance nor
    /// reset the count. The count expires on the next qualifying sample
    /// when the gap since the previous one exceeds the window.
    pub fn observe(&mut self, sample: MotionSample, at: Timestamp) -> Option<ShakeEvent> {
        if sample.magnitude() <= self.threshold {
            return None;
        }
        if let Some(previous) = self.last_qualifying {
            let gap = at.as_unix_millis().saturating_sub(previous.as_unix_millis());
            if gap > window_millis(self.window) {
                self.count = 0;
            }
        }
        self.last_qualifying = Some(at);
        self.count = self.count.saturating_add(1);
        if self.count >= self.trigger_count {
            self.count = 0;
            self.last_qualifying = None;
            return Some(ShakeEvent { at });
        }
        None
    }

    /// Qualifying samples accumulated toward the next event.
    #[must_use]
    pub fn shake_count(&self) -> u32 {
        self.count
    }

    /// Clears any partial gesture progress.
    pub fn reset(&mut self) {
        self.count = 0;
        self.last_qualifying = None;
    }
}

/// Window length in milliseconds, saturating at `i64::MAX`.
fn window_millis(window: Duration) -> i64 {
    i64::try_from(window.as_millis()).unwrap_or(i64::MAX)
}
