//! Terminal front end: one frame every ~33ms.
//!
//! Reads keys, drives the voice intro while the game sits in `Intro`,
//! forwards player commands to the game loop, and draws the latest snapshot.

use std::io::Write;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use paranoid_core::commands::PlayerCommand;
use paranoid_core::enums::GamePhase;
use paranoid_voice::intro::IntroScreen;
use paranoid_voice::recorder::Microphone;
use paranoid_voice::WeaponSound;

use crate::audio::{self, Playback};
use crate::input::{Edge, EdgeDetector, KeyTracker, Steering};
use crate::render::{self, IntroView, Overlay, Viewport};
use crate::state::GameHandle;

const FRAME: Duration = Duration::from_millis(33);

/// Frames the firing indicator stays lit.
const SHOT_FLASH_FRAMES: u32 = 6;

/// What a single key press asks for, given the phase it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    UseDefaultSound,
    Game(PlayerCommand),
    None,
}

/// One-shot key bindings. Held keys (steering, record) are read from the
/// tracker each frame instead.
pub fn key_action(code: KeyCode, modifiers: KeyModifiers, phase: GamePhase) -> KeyAction {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('d') | KeyCode::Char('D') if phase == GamePhase::Intro => {
            KeyAction::UseDefaultSound
        }
        KeyCode::Char(' ') if phase == GamePhase::Playing => KeyAction::Game(PlayerCommand::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => match phase {
            GamePhase::Playing => KeyAction::Game(PlayerCommand::Pause),
            GamePhase::Paused => KeyAction::Game(PlayerCommand::Resume),
            _ => KeyAction::None,
        },
        KeyCode::Char('r') | KeyCode::Char('R') if phase.is_terminal() => {
            KeyAction::Game(PlayerCommand::Restart)
        }
        _ => KeyAction::None,
    }
}

pub struct Frontend<M: Microphone> {
    intro: IntroScreen<M>,
    game: GameHandle,
    keys: KeyTracker,
    record_key: EdgeDetector,
    last_steering: Steering,
    weapon: Option<WeaponSound>,
    speaker: Box<dyn Playback>,
    shot_flash: u32,
    started: Instant,
}

impl<M: Microphone> Frontend<M> {
    pub fn new(intro: IntroScreen<M>, game: GameHandle, speaker: Box<dyn Playback>) -> Self {
        Self {
            intro,
            game,
            keys: KeyTracker::new(),
            record_key: EdgeDetector::default(),
            last_steering: Steering::default(),
            weapon: None,
            speaker,
            shot_flash: 0,
            started: Instant::now(),
        }
    }

    /// Run until the player quits or the game loop goes away.
    pub fn run<W: Write>(&mut self, out: &mut W, events: &mpsc::Receiver<Event>) -> std::io::Result<()> {
        loop {
            let frame_start = Instant::now();
            self.keys.next_frame();

            let Some(snap) = self.game.snapshot() else {
                std::thread::sleep(FRAME);
                continue;
            };
            let phase = snap.phase;

            if self.handle_events(events, phase) {
                log::info!("Quit requested");
                return Ok(());
            }

            let connected = if phase == GamePhase::Intro {
                self.update_intro()
            } else {
                self.update_steering()
            };
            if !connected {
                return Ok(());
            }
            self.play_audio();

            let view = Viewport::current()?;
            if phase == GamePhase::Intro {
                render::render_intro(
                    out,
                    &IntroView {
                        state: self.intro.state(),
                        notice: self.intro.notice(),
                        message: snap.message.as_deref(),
                    },
                    view,
                )?;
            } else {
                let weapon = self
                    .weapon
                    .as_ref()
                    .map(WeaponSound::describe)
                    .unwrap_or_default();
                render::render_game(
                    out,
                    &snap,
                    view,
                    &Overlay {
                        weapon: &weapon,
                        shot_flash: self.shot_flash,
                    },
                )?;
            }
            self.shot_flash = self.shot_flash.saturating_sub(1);

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME {
                std::thread::sleep(FRAME - elapsed);
            }
        }
    }

    /// Drain pending terminal events. Returns true when the player quits.
    fn handle_events(&mut self, events: &mpsc::Receiver<Event>, phase: GamePhase) -> bool {
        while let Ok(event) = events.try_recv() {
            let Event::Key(key) = event else {
                continue;
            };
            let fresh = self.keys.record(&key);
            if !fresh || key.kind != KeyEventKind::Press {
                continue;
            }
            match key_action(key.code, key.modifiers, phase) {
                KeyAction::Quit => return true,
                KeyAction::UseDefaultSound => self.intro.use_default_sound(),
                KeyAction::Game(command) => {
                    if !self.send(command) {
                        return true;
                    }
                }
                KeyAction::None => {}
            }
        }
        false
    }

    /// Forward a command, logging if the game loop has gone away.
    fn send(&self, command: PlayerCommand) -> bool {
        let sent = self.game.send(command);
        if !sent {
            log::error!("Game loop is gone");
        }
        sent
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Returns false once the game loop stops accepting commands.
    fn update_intro(&mut self) -> bool {
        let now = self.now_ms();
        match self.record_key.update(self.keys.is_held(KeyCode::Char('r'))) {
            Some(Edge::Pressed) => self.intro.record_pressed(now),
            Some(Edge::Released) => self.intro.record_released(now),
            None => {}
        }
        self.intro.update(now);

        if let Some(sound) = self.intro.take_sound() {
            log::info!("Starting game with weapon sound {}", sound.describe());
            self.weapon = Some(sound);
            return self.send(PlayerCommand::BeginPlay);
        }
        true
    }

    fn update_steering(&mut self) -> bool {
        // Keep the record key edge in sync so a held R does not start a
        // recording the moment the intro comes back.
        self.record_key.update(self.keys.is_held(KeyCode::Char('r')));

        let steering = self.keys.steering();
        if steering != self.last_steering {
            self.last_steering = steering;
            return self.send(PlayerCommand::SetControls {
                rotate_left: steering.rotate_left,
                rotate_right: steering.rotate_right,
                thrust: steering.thrust,
            });
        }
        true
    }

    /// The ship's shots play the weapon sound and light the indicator.
    fn play_audio(&mut self) {
        let events = self.game.drain_audio();
        if audio::play_cues(self.speaker.as_mut(), self.weapon.as_ref(), &events) {
            self.shot_flash = SHOT_FLASH_FRAMES;
        }
    }
}
