// crates/aegis-client/src/lib.rs
// ============================================================================
// Module: aegis-client
// Description: Device-side collaborators for the Aegis safety runtime.
// Purpose: Observe motion, location, and audio signals and drive the
//          emergency alert session against the Aegis HTTP API.
// Dependencies: aegis-core, aegis-config, async-trait, reqwest, tokio
// ============================================================================

//! ## Overview
//!
//! This crate hosts the pieces of Aegis that live next to the hardware:
//! a shake detector fed by accelerometer samples, a periodic location
//! tracker, a bounded audio recorder, and the alert session state machine
//! that ties them together when an emergency is raised. Every hardware
//! boundary is a trait so the whole stack runs in tests with stub devices.

/// Trigger API client over HTTP.
pub mod api;
/// Audio capture boundary and bounded recorder.
pub mod audio;
/// Periodic location sampling.
pub mod location;
/// Shake detection over accelerometer samples.
pub mod motion;
/// Emergency alert session state machine.
pub mod session;

pub use api::ApiError;
pub use api::HttpTriggerApi;
pub use api::TriggerApi;
pub use audio::AudioCapture;
pub use audio::AudioClip;
pub use audio::AudioError;
pub use audio::AudioRecorder;
pub use audio::AudioSource;
pub use location::LocationTracker;
pub use location::Position;
pub use location::PositionError;
pub use location::PositionOptions;
pub use location::PositionProvider;
pub use location::PositionUpdate;
pub use motion::MotionSample;
pub use motion::ShakeDetector;
pub use motion::ShakeEvent;
pub use session::AlertSession;
pub use session::EmergencyEffects;
pub use session::NoopEffects;
pub use session::SessionState;
pub use session::Telephony;
