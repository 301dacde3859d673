//! Intro screen state machine.
//!
//! Idle → Recording → Submitting → Ready, with Failed as a resting state the
//! player can leave by recording again or by taking the default sound. The
//! game only starts once the screen is Ready.

use std::sync::Arc;

use crate::api::SoundApi;
use crate::recorder::{Microphone, Recorder, RecorderEvent, RecorderSettings};
use crate::sound::WeaponSound;
use crate::submission::Submission;

#[derive(Debug, Clone, PartialEq)]
pub enum IntroState {
    /// Waiting for the record key.
    Idle,
    /// Record key held. `fraction` of the maximum window used so far.
    Recording { elapsed_ms: u64, fraction: f64 },
    /// Clip sent, waiting on the service.
    Submitting,
    /// A weapon sound is ready; the game can start.
    Ready,
    /// The service call failed. Stays here until the player acts.
    Failed { message: String },
}

pub struct IntroScreen<M: Microphone> {
    recorder: Recorder<M>,
    service: Arc<dyn SoundApi>,
    state: IntroState,
    pending: Option<Submission>,
    sound: Option<WeaponSound>,
    /// Last notice for the player (too short, microphone trouble, ...).
    notice: Option<String>,
}

impl<M: Microphone> IntroScreen<M> {
    pub fn new(mic: M, service: Arc<dyn SoundApi>, settings: RecorderSettings) -> Self {
        Self {
            recorder: Recorder::new(mic, settings),
            service,
            state: IntroState::Idle,
            pending: None,
            sound: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &IntroState {
        &self.state
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.state == IntroState::Ready
    }

    /// Record key down. Accepted from Idle and Failed.
    pub fn record_pressed(&mut self, now_ms: u64) {
        if !matches!(self.state, IntroState::Idle | IntroState::Failed { .. }) {
            return;
        }
        match self.recorder.press(now_ms) {
            Some(RecorderEvent::Started) => {
                self.notice = None;
                self.state = IntroState::Recording {
                    elapsed_ms: 0,
                    fraction: 0.0,
                };
            }
            Some(event) => self.apply(event),
            None => {}
        }
    }

    /// Record key up.
    pub fn record_released(&mut self, now_ms: u64) {
        if let Some(event) = self.recorder.release(now_ms) {
            self.apply(event);
        }
    }

    /// Per-tick update: recording progress, the length guard, and the
    /// pending submission.
    pub fn update(&mut self, now_ms: u64) {
        if let Some(event) = self.recorder.update(now_ms) {
            self.apply(event);
        }

        let Some(result) = self.pending.as_ref().and_then(Submission::poll) else {
            return;
        };
        self.pending = None;
        match result {
            Ok(sound) => {
                log::info!("Weapon sound ready: {}", sound.describe());
                self.sound = Some(sound);
                self.state = IntroState::Ready;
            }
            Err(e) => {
                self.state = IntroState::Failed {
                    message: e.to_string(),
                };
            }
        }
    }

    /// Skip the voice step and use the built-in sound. Not available while
    /// recording or while a submission is in flight.
    pub fn use_default_sound(&mut self) {
        if !matches!(self.state, IntroState::Idle | IntroState::Failed { .. }) {
            return;
        }
        log::info!("Using the default weapon sound");
        self.sound = Some(WeaponSound::default_sound());
        self.state = IntroState::Ready;
    }

    /// Hand the ready sound to the game. Leaves the screen Idle for the next
    /// visit.
    pub fn take_sound(&mut self) -> Option<WeaponSound> {
        if !self.is_ready() {
            return None;
        }
        self.state = IntroState::Idle;
        self.sound.take()
    }

    fn apply(&mut self, event: RecorderEvent) {
        match event {
            RecorderEvent::Started => {}
            RecorderEvent::Progress {
                elapsed_ms,
                fraction,
            } => {
                self.state = IntroState::Recording {
                    elapsed_ms,
                    fraction,
                };
            }
            RecorderEvent::Captured(clip) => match Submission::start(Arc::clone(&self.service), clip) {
                Ok(submission) => {
                    self.pending = Some(submission);
                    self.state = IntroState::Submitting;
                }
                Err(e) => {
                    self.state = IntroState::Failed {
                        message: e.to_string(),
                    };
                }
            },
            RecorderEvent::TooShort { elapsed_ms } => {
                self.notice = Some(format!(
                    "Too short ({} ms). Hold the key for at least {} ms.",
                    elapsed_ms,
                    self.recorder.settings().min_ms
                ));
                self.state = IntroState::Idle;
            }
            RecorderEvent::Failed(e) => {
                self.notice = Some(e.to_string());
                self.state = IntroState::Idle;
            }
        }
    }
}
