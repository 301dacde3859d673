//! Background submission of a recorded clip.
//!
//! The network round trip and the decode run on their own thread; the game
//! loop polls for the result once per tick and never blocks on it.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::api::{self, SoundApi};
use crate::error::VoiceError;
use crate::sound::WeaponSound;
use crate::wav::Clip;

/// A clip in flight.
pub struct Submission {
    rx: Receiver<Result<WeaponSound, VoiceError>>,
}

impl Submission {
    /// Send `clip` to the service on a worker thread.
    pub fn start(service: Arc<dyn SoundApi>, clip: Clip) -> Result<Self, VoiceError> {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("voice-submit".into())
            .spawn(move || {
                let result = api::submit(service.as_ref(), &clip).and_then(WeaponSound::from_processed);
                if let Err(e) = &result {
                    log::warn!("Voice submission failed: {}", e);
                }
                // The intro may have been torn down; nobody to tell.
                let _ = tx.send(result);
            })
            .map_err(|e| VoiceError::Worker(e.to_string()))?;

        log::info!("Submitted recording to sound service");
        Ok(Self { rx })
    }

    /// The result, once the worker is done.
    pub fn poll(&self) -> Option<Result<WeaponSound, VoiceError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(VoiceError::Worker(
                "worker exited without a result".into(),
            ))),
        }
    }
}
