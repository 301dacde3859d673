//! Error types for the voice intro.

use thiserror::Error;

/// Everything that can go wrong between the record key and a usable weapon
/// sound. All variants are recoverable; the intro stays up and reports them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoiceError {
    /// Capture device missing, denied, or failed mid-recording.
    #[error("microphone error: {0}")]
    Microphone(String),

    /// The sound service rejected or could not issue a credential.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The processing request failed in transit or was refused.
    #[error("request failed: {0}")]
    Request(String),

    /// Returned audio was not valid base64 or not a readable WAV.
    #[error("could not decode audio: {0}")]
    Decode(String),

    /// No sound service or microphone is configured.
    #[error("voice service unavailable: {0}")]
    Unavailable(String),

    /// The background submission thread died or could not start.
    #[error("submission worker failed: {0}")]
    Worker(String),
}
