//! Rendering layer. All terminal output lives here.
//!
//! Each function receives a writer and an immutable view of what to show.
//! No game logic happens here; this module only translates snapshots into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use paranoid_core::enums::{BulletSource, GamePhase};
use paranoid_core::state::{ArenaView, GameStateSnapshot};
use paranoid_core::types::Position;
use paranoid_voice::intro::IntroState;

const C_HUD: Color = Color::Yellow;
const C_LIVES: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_ASTEROID: Color = Color::DarkYellow;
const C_BULLET_SHIP: Color = Color::Cyan;
const C_BULLET_HOSTILE: Color = Color::Magenta;
const C_UFO: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_WARN: Color = Color::Red;

/// Terminal area available for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self { cols, rows })
    }

    /// Playfield rows: everything between the HUD line and the hint line.
    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(2)
    }
}

/// Map an arena position to a terminal cell inside the playfield. `None`
/// when it falls outside.
pub fn to_cell(pos: &Position, arena: &ArenaView, view: Viewport) -> Option<(u16, u16)> {
    if arena.width <= 0.0 || arena.height <= 0.0 || view.cols == 0 || view.field_rows() == 0 {
        return None;
    }
    let fx = pos.x / arena.width;
    let fy = pos.y / arena.height;
    if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
        return None;
    }
    let col = (fx * (view.cols - 1) as f64).round() as u16;
    let row = 1 + (fy * (view.field_rows() - 1) as f64).round() as u16;
    Some((col, row))
}

/// Arrow closest to the facing angle (radians, +y down).
pub fn ship_glyph(rotation: f64) -> char {
    const ARROWS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];
    let octant = (rotation.rem_euclid(std::f64::consts::TAU) / std::f64::consts::FRAC_PI_4).round() as usize;
    ARROWS[octant % 8]
}

fn asteroid_glyph(scale: f64) -> char {
    if scale >= 0.15 {
        '@'
    } else if scale >= 0.075 {
        'o'
    } else {
        '·'
    }
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn put_centered<W: Write>(out: &mut W, view: Viewport, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    put(out, col, row, color, text)
}

/// What the front end knows beyond the snapshot.
pub struct Overlay<'a> {
    /// Label of the weapon sound in use.
    pub weapon: &'a str,
    /// Frames left to show the "firing" indicator.
    pub shot_flash: u32,
}

/// Render one complete frame of a running, paused or finished game.
pub fn render_game<W: Write>(
    out: &mut W,
    snap: &GameStateSnapshot,
    view: Viewport,
    overlay: &Overlay<'_>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, snap, view)?;

    for asteroid in &snap.asteroids {
        if let Some((c, r)) = to_cell(&asteroid.position, &snap.arena, view) {
            put(out, c, r, C_ASTEROID, &asteroid_glyph(asteroid.scale).to_string())?;
        }
    }
    for bullet in &snap.bullets {
        if let Some((c, r)) = to_cell(&bullet.position, &snap.arena, view) {
            let color = match bullet.source {
                BulletSource::Ship => C_BULLET_SHIP,
                BulletSource::Asteroid | BulletSource::Ufo => C_BULLET_HOSTILE,
            };
            put(out, c, r, color, "•")?;
        }
    }
    if let Some(ufo) = &snap.ufo {
        if let Some((c, r)) = to_cell(&ufo.position, &snap.arena, view) {
            put(out, c.saturating_sub(1), r, C_UFO, "<O>")?;
        }
    }
    if let Some(ship) = &snap.ship {
        if let Some((c, r)) = to_cell(&ship.position, &snap.arena, view) {
            put(out, c, r, C_SHIP, &ship_glyph(ship.rotation).to_string())?;
        }
    }

    let hint = if overlay.shot_flash > 0 {
        format!("♪ {}", overlay.weapon)
    } else {
        format!("weapon: {}", overlay.weapon)
    };
    put(out, 1, view.rows.saturating_sub(1), C_HINT, &hint)?;

    let mid = view.rows / 2;
    match snap.phase {
        GamePhase::Paused => {
            put_centered(out, view, mid, C_TITLE, "PAUSED")?;
            put_centered(out, view, mid + 1, C_HINT, "P : resume")?;
        }
        GamePhase::GameOver => {
            put_centered(out, view, mid, C_WARN, "GAME OVER")?;
            put_centered(out, view, mid + 1, C_HUD, &format!("Run score: {}", snap.hud.run_score))?;
            put_centered(out, view, mid + 2, C_HINT, "R : back to intro   Q : quit")?;
        }
        GamePhase::Completed => {
            put_centered(out, view, mid, C_TITLE, "ALL LEVELS SURVIVED")?;
            put_centered(out, view, mid + 1, C_HUD, &format!("Run score: {}", snap.hud.run_score))?;
            put_centered(out, view, mid + 2, C_HINT, "R : back to intro   Q : quit")?;
        }
        GamePhase::Intro | GamePhase::Playing => {}
    }

    finish(out, view)
}

fn draw_hud<W: Write>(out: &mut W, snap: &GameStateSnapshot, view: Viewport) -> std::io::Result<()> {
    let hud = &snap.hud;
    put(
        out,
        1,
        0,
        C_HUD,
        &format!("Level {}   Score {:>5}   Run {:>5}", hud.level, hud.score, hud.run_score),
    )?;

    let right = format!("Time {:>2}s  Lives {}", hud.time_left_secs, "♥".repeat(hud.lives.max(0) as usize));
    let col = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    put(out, col, 0, C_LIVES, &right)
}

/// What the intro screen shows.
pub struct IntroView<'a> {
    pub state: &'a IntroState,
    /// Recorder notice (too short, microphone trouble).
    pub notice: Option<&'a str>,
    /// Simulation message (e.g. why the last start failed).
    pub message: Option<&'a str>,
}

pub fn render_intro<W: Write>(out: &mut W, intro: &IntroView<'_>, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mid = view.rows / 2;
    put_centered(out, view, mid.saturating_sub(5), C_TITLE, "P A R A N O I D   A S T E R O I D S")?;
    put_centered(out, view, mid.saturating_sub(3), C_HINT, "Hold R and shout your weapon sound.")?;

    let status = match intro.state {
        IntroState::Idle => "Waiting for your voice...".to_string(),
        IntroState::Recording { elapsed_ms, fraction } => {
            let width = 20usize;
            let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
            format!("REC [{}{}] {:.1}s", "█".repeat(filled), " ".repeat(width - filled), *elapsed_ms as f64 / 1000.0)
        }
        IntroState::Submitting => "Sending to the sound lab...".to_string(),
        IntroState::Ready => "Weapon armed!".to_string(),
        IntroState::Failed { message } => format!("Failed: {}", message),
    };
    let color = match intro.state {
        IntroState::Failed { .. } => C_WARN,
        _ => C_HUD,
    };
    put_centered(out, view, mid.saturating_sub(1), color, &status)?;

    let mut row = mid + 1;
    for line in [intro.notice, intro.message].into_iter().flatten() {
        put_centered(out, view, row, C_WARN, line)?;
        row += 1;
    }

    put_centered(
        out,
        view,
        view.rows.saturating_sub(2),
        C_HINT,
        "R : record   D : default sound   Q : quit",
    )?;
    put_centered(
        out,
        view,
        view.rows.saturating_sub(1),
        C_HINT,
        "In game: ←/→ turn   ↑ thrust   SPACE fire   P pause",
    )?;

    finish(out, view)
}

fn finish<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()
}
