//! Contract with the remote transcription / sound-generation service.
//!
//! The transport is left to the front end; anything that can authenticate
//! and post a clip implements [`SoundApi`].

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::VoiceError;
use crate::wav::{self, Clip};

/// Peak level of a clip returned by [`OfflineApi`], as a fraction of full scale.
const OFFLINE_PEAK: f64 = 0.9;

/// Bearer credential issued by [`SoundApi::authenticate`].
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Response to a processed clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedAudio {
    /// What the service heard.
    pub transcript: String,
    /// Synthesized weapon sound, a base64-encoded WAV file.
    pub audio_base64: String,
}

/// The remote service. Calls block; the intro runs them off the game loop.
pub trait SoundApi: Send + Sync {
    fn authenticate(&self) -> Result<Token, VoiceError>;

    /// Upload a clip (as WAV, see [`Clip::to_wav`]) and get the synthesized sound back.
    fn process_audio(&self, clip: &Clip, token: &Token) -> Result<ProcessedAudio, VoiceError>;
}

/// Used when no service is configured. Every call fails with `Unavailable`.
#[derive(Debug, Default)]
pub struct UnavailableApi;

impl SoundApi for UnavailableApi {
    fn authenticate(&self) -> Result<Token, VoiceError> {
        Err(VoiceError::Unavailable("no sound service configured".into()))
    }

    fn process_audio(&self, _clip: &Clip, _token: &Token) -> Result<ProcessedAudio, VoiceError> {
        Err(VoiceError::Unavailable("no sound service configured".into()))
    }
}

/// Works without a network: the recording itself comes back as the weapon
/// sound, normalised to a fixed peak.
#[derive(Debug, Default)]
pub struct OfflineApi;

impl OfflineApi {
    pub const TRANSCRIPT: &'static str = "your voice";
}

impl SoundApi for OfflineApi {
    fn authenticate(&self) -> Result<Token, VoiceError> {
        Ok(Token::new("offline"))
    }

    fn process_audio(&self, clip: &Clip, _token: &Token) -> Result<ProcessedAudio, VoiceError> {
        let peak = clip
            .samples
            .iter()
            .map(|&s| (s as i32).unsigned_abs())
            .max()
            .unwrap_or(0);
        if peak == 0 {
            return Err(VoiceError::Request("nothing was heard".into()));
        }

        let gain = OFFLINE_PEAK * i16::MAX as f64 / peak as f64;
        let samples = clip
            .samples
            .iter()
            .map(|&s| (s as f64 * gain).clamp(i16::MIN as f64, i16::MAX as f64) as i16)
            .collect();
        let bytes = wav::encode(&Clip::new(samples, clip.sample_rate))?;

        Ok(ProcessedAudio {
            transcript: Self::TRANSCRIPT.to_string(),
            audio_base64: BASE64.encode(bytes),
        })
    }
}

/// Authenticate, then process the clip.
pub fn submit(api: &dyn SoundApi, clip: &Clip) -> Result<ProcessedAudio, VoiceError> {
    let token = api.authenticate()?;
    log::debug!("Authenticated with sound service");
    let processed = api.process_audio(clip, &token)?;
    log::info!("Sound service heard \"{}\"", processed.transcript);
    Ok(processed)
}
