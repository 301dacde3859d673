//! State shared between the terminal front end and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use paranoid_core::commands::PlayerCommand;
use paranoid_core::events::AudioEvent;
use paranoid_core::state::GameStateSnapshot;

/// Commands sent from the front end to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// The front end's handle on a running game loop.
pub struct GameHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    /// Audio cues from every tick, in order. The snapshot only holds the
    /// latest tick's cues, which the front end would miss between frames.
    pub audio_rx: mpsc::Receiver<AudioEvent>,
    pub latest_snapshot: SharedSnapshot,
    pub thread: Option<JoinHandle<()>>,
}

impl GameHandle {
    /// Forward a player command. Returns false if the loop has gone away.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }

    /// Audio cues since the last call.
    pub fn drain_audio(&self) -> Vec<AudioEvent> {
        self.audio_rx.try_iter().collect()
    }

    /// Stop the loop and wait for it.
    pub fn shutdown(&mut self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Game loop thread panicked");
            }
        }
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
