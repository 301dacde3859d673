//! Voice intro for Paranoid Asteroids.
//!
//! Records a short clip of the player's voice, sends it to a remote
//! transcription / sound-generation service, and turns the returned audio
//! into the weapon sound. Microphone and HTTP transport are traits so the
//! front end can plug in whatever it has, or nothing at all.

pub mod api;
pub mod error;
pub mod intro;
pub mod recorder;
pub mod sound;
pub mod submission;
pub mod wav;

pub use error::VoiceError;
pub use intro::{IntroScreen, IntroState};
pub use sound::WeaponSound;
