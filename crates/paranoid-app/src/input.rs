//! Held-key tracking for terminals with and without key-release events.
//!
//! Every press or repeat stamps the key with the current frame. A key counts
//! as held while its stamp is at most `HOLD_WINDOW` frames old, or until its
//! release event arrives on terminals that report releases.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Frames a press or repeat keeps a key live. Shorter than the OS repeat
/// interval at 30 FPS.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

/// Steering keys as the simulation sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame.
    pub fn next_frame(&mut self) {
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Record a key event. Returns true for a fresh press (not a repeat).
    pub fn record(&mut self, event: &KeyEvent) -> bool {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press => {
                let fresh = !self.is_held(code);
                self.key_frame.insert(code, self.frame);
                fresh
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
                false
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                false
            }
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.key_frame
            .get(&normalize(code))
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&c| self.is_held(c))
    }

    pub fn steering(&self) -> Steering {
        Steering {
            rotate_left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')]),
            rotate_right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')]),
            thrust: self.any_held(&[KeyCode::Up, KeyCode::Char('w')]),
        }
    }
}

/// Letters are tracked case-insensitively.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Turns a held key into press / release edges.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    was_held: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

impl EdgeDetector {
    pub fn update(&mut self, held: bool) -> Option<Edge> {
        let edge = match (self.was_held, held) {
            (false, true) => Some(Edge::Pressed),
            (true, false) => Some(Edge::Released),
            _ => None,
        };
        self.was_held = held;
        edge
    }
}
