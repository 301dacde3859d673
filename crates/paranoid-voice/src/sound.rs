//! The weapon sound: either synthesized from the player's voice or the
//! built-in fallback.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::api::ProcessedAudio;
use crate::error::VoiceError;
use crate::wav::{self, Clip};

const DEFAULT_SAMPLE_RATE: u32 = 24_000;
const DEFAULT_DURATION_MS: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundOrigin {
    /// Made by the sound service from what the player said.
    Voice { transcript: String },
    /// Built in.
    Default,
}

/// Audio played whenever the ship fires.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponSound {
    pub origin: SoundOrigin,
    pub clip: Clip,
}

impl WeaponSound {
    /// Decode the service's base64 WAV payload.
    pub fn from_processed(processed: ProcessedAudio) -> Result<Self, VoiceError> {
        let payload = processed.audio_base64.trim();
        if payload.is_empty() {
            return Err(VoiceError::Decode("service returned no audio".into()));
        }
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| VoiceError::Decode(format!("invalid base64: {}", e)))?;
        let clip = wav::decode(&bytes)?;
        if clip.is_empty() {
            return Err(VoiceError::Decode("returned audio is silent".into()));
        }

        Ok(Self {
            origin: SoundOrigin::Voice {
                transcript: processed.transcript,
            },
            clip,
        })
    }

    /// A short descending blip.
    pub fn default_sound() -> Self {
        let total = (DEFAULT_SAMPLE_RATE * DEFAULT_DURATION_MS / 1000) as usize;
        let mut phase = 0.0f64;
        let samples = (0..total)
            .map(|i| {
                let t = i as f64 / total as f64;
                let freq = 1200.0 - 900.0 * t;
                phase += std::f64::consts::TAU * freq / DEFAULT_SAMPLE_RATE as f64;
                let envelope = 1.0 - t;
                (phase.sin() * envelope * 0.6 * i16::MAX as f64) as i16
            })
            .collect();

        Self {
            origin: SoundOrigin::Default,
            clip: Clip::new(samples, DEFAULT_SAMPLE_RATE),
        }
    }

    pub fn is_default(&self) -> bool {
        self.origin == SoundOrigin::Default
    }

    /// Short label for the HUD.
    pub fn describe(&self) -> String {
        match &self.origin {
            SoundOrigin::Voice { transcript } => format!("\"{}\"", transcript),
            SoundOrigin::Default => "default blip".to_string(),
        }
    }
}
