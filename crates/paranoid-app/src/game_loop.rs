//! Game loop thread: runs the simulation engine at 60Hz and publishes
//! snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state for
//! the front end to poll; audio cues are forwarded over a second channel.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use paranoid_core::constants::TICK_RATE;
use paranoid_core::events::AudioEvent;
use paranoid_sim::{SimConfig, SimulationEngine};

use crate::state::{GameHandle, GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: SimConfig) -> std::io::Result<GameHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (audio_tx, audio_rx) = mpsc::channel::<AudioEvent>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("paranoid-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, audio_tx, &shared);
        })?;

    Ok(GameHandle {
        command_tx: cmd_tx,
        audio_rx,
        latest_snapshot,
        thread: Some(thread),
    })
}

/// Move every pending command into the engine. Returns false once the loop
/// should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    audio_tx: mpsc::Sender<AudioEvent>,
    latest_snapshot: &Mutex<Option<paranoid_core::state::GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    log::info!("Game loop started at {} Hz", TICK_RATE);

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            log::info!("Game loop stopping at tick {}", engine.time().tick);
            return;
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Forward audio cues
        for event in &snapshot.audio_events {
            log::debug!("audio: {:?}", event);
            let _ = audio_tx.send(event.clone());
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paranoid_core::commands::PlayerCommand;
    use paranoid_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::BeginPlay))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::BeginPlay)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_stops_on_shutdown() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        let mut engine = SimulationEngine::new(SimConfig::default());

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::BeginPlay))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx));
        assert_eq!(engine.tick().phase, GamePhase::Playing);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = SimulationEngine::new(SimConfig::default());

        engine.queue_command(PlayerCommand::BeginPlay);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);

        engine.queue_command(PlayerCommand::Pause);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_tick = snap.time.tick;

        // Tick while paused, time should not advance
        let snap = engine.tick();
        assert_eq!(snap.time.tick, paused_tick);

        engine.queue_command(PlayerCommand::Resume);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(snap.time.tick > paused_tick);
    }

    #[test]
    fn test_spawned_loop_publishes_snapshots() {
        let mut handle = spawn_game_loop(SimConfig::default()).unwrap();
        assert!(handle.send(PlayerCommand::BeginPlay));

        let mut phase = None;
        for _ in 0..200 {
            if let Some(snap) = handle.snapshot() {
                if snap.phase == GamePhase::Playing {
                    phase = Some(snap.phase);
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(phase, Some(GamePhase::Playing));
        assert!(handle
            .drain_audio()
            .contains(&AudioEvent::LevelStarted { level: 1 }));

        handle.shutdown();
        assert!(handle.thread.is_none());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
