// crates/aegis-client/src/session.rs
// ============================================================================
// Module: session
// Description: Emergency alert session state machine.
// Purpose: Orchestrate effects, evidence recording, the trigger call, and
//          the delayed voice call for one emergency episode.
// Dependencies: aegis-config, tokio
// ============================================================================

//! ## Overview
//!
//! An [`AlertSession`] covers one emergency episode from the moment the
//! user (or the shake detector) raises it until the user closes it.
//! Opening a session starts the deterrent effects and the bounded audio
//! recording, raises the emergency through [`TriggerApi`], and on success
//! schedules a voice call to the primary contact after a short delay.
//! Closing the session tears everything down unconditionally; alert
//! records already created on the server are kept, never rolled back.

use crate::api::ApiError;
use crate::api::TriggerApi;
use crate::audio::AudioClip;
use crate::audio::AudioRecorder;
use aegis_config::ClientConfig;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

// ============================================================================
// SECTION: Device boundaries
// ============================================================================

/// Deterrent side effects running for the whole episode, such as a siren
/// and a flashing screen.
pub trait EmergencyEffects: Send + Sync {
    /// Starts the effects.
    fn start(&self);
    /// Stops the effects.
    fn stop(&self);
}

/// Effects implementation that does nothing. Useful headless and in tests.
pub struct NoopEffects;

impl EmergencyEffects for NoopEffects {
    fn start(&self) {}

    fn stop(&self) {}
}

/// Places voice calls.
pub trait Telephony: Send + Sync {
    /// Dials the given phone number.
    fn dial(&self, phone: &str);
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Observable state of one emergency episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Trigger request in flight.
    Sending,
    /// The server accepted the trigger.
    Sent {
        /// Name of the primary contact that was notified.
        primary_name: String,
        /// Phone numbers notified for this alert.
        contacts_notified: Vec<String>,
    },
    /// The trigger failed; the episode stays open so the user sees why.
    Error {
        /// Failure description for the user.
        message: String,
    },
    /// The user closed the episode.
    Cancelled,
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Orchestrates one emergency episode.
///
/// # Invariants
/// - Effects and recording start before the trigger request is sent, so
///   evidence exists even when the request fails.
/// - Closing the session never deletes the alert record on the server.
pub struct AlertSession {
    /// Server boundary for raising the emergency.
    api: Arc<dyn TriggerApi>,
    /// Evidence recorder, shared with the auto-stop timer.
    recorder: Arc<Mutex<AudioRecorder>>,
    /// Deterrent effects.
    effects: Arc<dyn EmergencyEffects>,
    /// Voice call capability.
    telephony: Arc<dyn Telephony>,
    /// Hard cap on evidence recording length.
    recording_limit: Duration,
    /// Pause before the voice call is placed.
    call_delay: Duration,
    /// Current episode state.
    state: SessionState,
    /// Pending voice call task, when scheduled.
    call_task: Option<JoinHandle<()>>,
    /// Recording auto-stop task, when running.
    recording_task: Option<JoinHandle<()>>,
    /// Clip captured during this episode, once recording stopped.
    clip: Arc<Mutex<Option<AudioClip>>>,
}

impl AlertSession {
    /// Builds a session with explicit tunables.
    #[must_use]
    pub fn new(
        api: Arc<dyn TriggerApi>,
        recorder: AudioRecorder,
        effects: Arc<dyn EmergencyEffects>,
        telephony: Arc<dyn Telephony>,
        recording_limit: Duration,
        call_delay: Duration,
    ) -> Self {
        Self {
            api,
            recorder: Arc::new(Mutex::new(recorder)),
            effects,
            telephony,
            recording_limit,
            call_delay,
            state: SessionState::Sending,
            call_task: None,
            recording_task: None,
            clip: Arc::new(Mutex::new(None)),
        }
    }

    /// Builds a session from the client configuration section.
    #[must_use]
    pub fn from_config(
        api: Arc<dyn TriggerApi>,
        recorder: AudioRecorder,
        effects: Arc<dyn EmergencyEffects>,
        telephony: Arc<dyn Telephony>,
        config: &ClientConfig,
    ) -> Self {
        Self::new(
            api,
            recorder,
            effects,
            telephony,
            Duration::from_secs(config.recording_limit_secs),
            Duration::from_secs(config.call_delay_secs),
        )
    }

    /// Opens the episode: starts effects and recording, raises the
    /// emergency, and on success schedules the delayed voice call.
    ///
    /// A recording failure does not abort the episode; the trigger is
    /// still sent. The resulting state is [`SessionState::Sent`] or
    /// [`SessionState::Error`].
    pub async fn open(&mut self, latitude: Option<f64>, longitude: Option<f64>) -> &SessionState {
        self.state = SessionState::Sending;
        self.effects.start();
        self.start_recording();
        match self.api.trigger(latitude, longitude).await {
            Ok(response) => {
                let contacts_notified = response
                    .alert
                    .contacts_notified
                    .clone()
                    .unwrap_or_else(|| vec![response.primary_contact.phone.clone()]);
                self.schedule_call(response.primary_contact.phone.clone());
                self.state = SessionState::Sent {
                    primary_name: response.primary_contact.name,
                    contacts_notified,
                };
            }
            Err(err) => {
                self.state = SessionState::Error {
                    message: describe_failure(&err),
                };
            }
        }
        &self.state
    }

    /// Closes the episode: cancels the pending call, stops recording and
    /// effects. Safe to call in any state.
    pub fn cancel(&mut self) {
        if let Some(task) = self.call_task.take() {
            task.abort();
        }
        if let Some(task) = self.recording_task.take() {
            task.abort();
        }
        stop_recorder(&self.recorder, &self.clip);
        self.effects.stop();
        self.state = SessionState::Cancelled;
    }

    /// Current episode state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the evidence recording is still running.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recorder
            .lock()
            .map(|recorder| recorder.is_recording())
            .unwrap_or(false)
    }

    /// Clip captured during this episode, once recording has stopped.
    #[must_use]
    pub fn clip(&self) -> Option<AudioClip> {
        self.clip.lock().ok().and_then(|slot| slot.clone())
    }

    /// Starts recording and arms the auto-stop timer.
    ///
    /// Any timer from a previous episode is aborted first so it cannot
    /// stop the freshly armed recording early.
    fn start_recording(&mut self) {
        if let Some(task) = self.recording_task.take() {
            task.abort();
        }
        let started = match self.recorder.lock() {
            Ok(mut recorder) => recorder.start().is_ok(),
            Err(_) => false,
        };
        if !started {
            return;
        }
        let recorder = Arc::clone(&self.recorder);
        let clip = Arc::clone(&self.clip);
        let limit = self.recording_limit;
        self.recording_task = Some(tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            stop_recorder(&recorder, &clip);
        }));
    }

    /// Schedules the delayed voice call to the primary contact.
    fn schedule_call(&mut self, phone: String) {
        let telephony = Arc::clone(&self.telephony);
        let delay = self.call_delay;
        self.call_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            telephony.dial(&phone);
        }));
    }
}

impl Drop for AlertSession {
    fn drop(&mut self) {
        if let Some(task) = self.call_task.take() {
            task.abort();
        }
        if let Some(task) = self.recording_task.take() {
            task.abort();
        }
    }
}

/// Stops the recorder and stashes the clip, tolerating a poisoned lock.
fn stop_recorder(recorder: &Arc<Mutex<AudioRecorder>>, clip: &Arc<Mutex<Option<AudioClip>>>) {
    let finished = match recorder.lock() {
        Ok(mut recorder) => recorder.stop(),
        Err(_) => None,
    };
    if let Some(finished) = finished
        && let Ok(mut slot) = clip.lock()
    {
        *slot = Some(finished);
    }
}

/// User-facing description of a trigger failure.
fn describe_failure(err: &ApiError) -> String {
    match err {
        ApiError::Rejected { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
