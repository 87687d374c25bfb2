// crates/aegis-client/src/audio.rs
// ============================================================================
// Module: audio
// Description: Audio capture boundary and the recorder built on it.
// Purpose: Record a bounded evidence clip during an emergency without
//          binding this crate to any particular audio backend.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//!
//! [`AudioRecorder`] owns at most one live capture at a time. Opening a
//! capture acquires the device through the [`AudioSource`] trait; stopping
//! finalizes it into an [`AudioClip`] and releases the device. The alert
//! session enforces the recording time limit; the recorder itself has no
//! notion of time.

use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// SECTION: Capture boundary
// ============================================================================

/// A finished recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Encoded audio payload.
    pub bytes: Vec<u8>,
    /// MIME type of the payload, e.g. `audio/webm`.
    pub mime: String,
}

/// Why audio capture failed.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No capture device could be acquired.
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
    /// The platform refused access to the microphone.
    #[error("microphone permission denied")]
    PermissionDenied,
}

/// A live capture in progress. Dropping one without finalizing discards
/// the audio and releases the device.
pub trait AudioCapture: Send {
    /// Finalizes the capture into a clip, releasing the device.
    fn finalize(self: Box<Self>) -> AudioClip;
}

/// Source of audio captures. Implemented by platform adapters and by
/// in-memory stubs in tests.
pub trait AudioSource: Send + Sync {
    /// Acquires the device and begins capturing.
    ///
    /// # Errors
    /// Returns an [`AudioError`] when the device cannot be acquired.
    fn open(&self) -> Result<Box<dyn AudioCapture>, AudioError>;
}

// ============================================================================
// SECTION: Recorder
// ============================================================================

/// Holds at most one live capture and turns it into a clip on stop.
pub struct AudioRecorder {
    /// Device boundary.
    source: Arc<dyn AudioSource>,
    /// The capture in progress, when recording.
    capture: Option<Box<dyn AudioCapture>>,
}

impl AudioRecorder {
    /// Builds a recorder over the given source.
    #[must_use]
    pub fn new(source: Arc<dyn AudioSource>) -> Self {
        Self {
            source,
            capture: None,
        }
    }

    /// Begins recording. A call while already recording is a no-op.
    ///
    /// # Errors
    /// Returns an [`AudioError`] when the device cannot be acquired.
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.capture.is_some() {
            return Ok(());
        }
        self.capture = Some(self.source.open()?);
        Ok(())
    }

    /// Stops recording and returns the clip, or `None` when idle.
    pub fn stop(&mut self) -> Option<AudioClip> {
        self.capture.take().map(AudioCapture::finalize)
    }

    /// Whether a capture is currently live.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.capture.is_some()
    }
}
