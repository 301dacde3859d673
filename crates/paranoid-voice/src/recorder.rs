//! Recording window: hold a key to record, release to stop.
//!
//! Time comes in from the caller as milliseconds on its own clock, so the
//! recorder never sleeps or reads the wall clock itself.

use crate::error::VoiceError;
use crate::wav::Clip;

/// Capture device.
pub trait Microphone {
    /// Begin capturing.
    fn start(&mut self) -> Result<(), VoiceError>;
    /// Stop capturing and hand back everything recorded since `start`.
    fn stop(&mut self) -> Result<Clip, VoiceError>;
}

impl<M: Microphone + ?Sized> Microphone for Box<M> {
    fn start(&mut self) -> Result<(), VoiceError> {
        (**self).start()
    }

    fn stop(&mut self) -> Result<Clip, VoiceError> {
        (**self).stop()
    }
}

/// Stand-in for hosts without a capture device. Every start fails.
#[derive(Debug, Default)]
pub struct NoMicrophone;

impl Microphone for NoMicrophone {
    fn start(&mut self) -> Result<(), VoiceError> {
        Err(VoiceError::Unavailable("no microphone configured".into()))
    }

    fn stop(&mut self) -> Result<Clip, VoiceError> {
        Err(VoiceError::Unavailable("no microphone configured".into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderSettings {
    /// Captures shorter than this are thrown away.
    pub min_ms: u64,
    /// Capture stops on its own after this long.
    pub max_ms: u64,
    /// Spacing of progress reports while recording.
    pub progress_interval_ms: u64,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            min_ms: 500,
            max_ms: 3000,
            progress_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Recording { started_ms: u64, last_progress_ms: u64 },
}

/// What the recorder did in response to a key or a clock update.
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderEvent {
    Started,
    /// Still recording; `fraction` of the maximum window has elapsed.
    Progress { elapsed_ms: u64, fraction: f64 },
    /// A usable clip.
    Captured(Clip),
    /// Released before the minimum; nothing is submitted.
    TooShort { elapsed_ms: u64 },
    /// The microphone failed; the recorder is idle again.
    Failed(VoiceError),
}

pub struct Recorder<M: Microphone> {
    mic: M,
    settings: RecorderSettings,
    state: State,
}

impl<M: Microphone> Recorder<M> {
    pub fn new(mic: M, settings: RecorderSettings) -> Self {
        Self {
            mic,
            settings,
            state: State::Idle,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, State::Recording { .. })
    }

    pub fn settings(&self) -> &RecorderSettings {
        &self.settings
    }

    /// Record key went down. Ignored while already recording.
    pub fn press(&mut self, now_ms: u64) -> Option<RecorderEvent> {
        if self.is_recording() {
            return None;
        }
        match self.mic.start() {
            Ok(()) => {
                self.state = State::Recording {
                    started_ms: now_ms,
                    last_progress_ms: now_ms,
                };
                log::debug!("Recording started");
                Some(RecorderEvent::Started)
            }
            Err(e) => {
                log::warn!("Microphone failed to start: {}", e);
                Some(RecorderEvent::Failed(e))
            }
        }
    }

    /// Record key came up. Ignored when not recording.
    pub fn release(&mut self, now_ms: u64) -> Option<RecorderEvent> {
        let State::Recording { started_ms, .. } = self.state else {
            return None;
        };
        Some(self.finish(now_ms.saturating_sub(started_ms)))
    }

    /// Advance the recording clock: progress reports and the maximum-length
    /// guard.
    pub fn update(&mut self, now_ms: u64) -> Option<RecorderEvent> {
        let State::Recording {
            started_ms,
            last_progress_ms,
        } = self.state
        else {
            return None;
        };

        let elapsed_ms = now_ms.saturating_sub(started_ms);
        if elapsed_ms >= self.settings.max_ms {
            log::debug!("Recording hit the {} ms limit", self.settings.max_ms);
            return Some(self.finish(elapsed_ms));
        }

        if now_ms.saturating_sub(last_progress_ms) >= self.settings.progress_interval_ms {
            self.state = State::Recording {
                started_ms,
                last_progress_ms: now_ms,
            };
            let fraction = elapsed_ms as f64 / self.settings.max_ms.max(1) as f64;
            return Some(RecorderEvent::Progress {
                elapsed_ms,
                fraction,
            });
        }
        None
    }

    fn finish(&mut self, elapsed_ms: u64) -> RecorderEvent {
        self.state = State::Idle;
        let clip = match self.mic.stop() {
            Ok(clip) => clip,
            Err(e) => {
                log::warn!("Microphone failed to stop: {}", e);
                return RecorderEvent::Failed(e);
            }
        };

        if elapsed_ms < self.settings.min_ms || clip.is_empty() {
            log::info!("Recording too short ({} ms), discarded", elapsed_ms);
            return RecorderEvent::TooShort { elapsed_ms };
        }
        log::info!(
            "Captured {} ms of audio ({} samples)",
            elapsed_ms,
            clip.samples.len()
        );
        RecorderEvent::Captured(clip)
    }
}
