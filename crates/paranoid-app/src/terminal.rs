//! Terminal setup, teardown and the keyboard reader thread.

use std::io::Write;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};

/// Raw mode plus the alternate screen for as long as it lives. Dropping it
/// restores the terminal, including during a panic unwind.
pub struct TerminalGuard<W: Write> {
    out: W,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(mut out: W) -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Ask for key release events. Terminals without the keyboard
        // protocol refuse and fall back to press/repeat only.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        log::debug!("Keyboard release events: {}", keyboard_enhanced);

        Ok(Self {
            out,
            keyboard_enhanced,
        })
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Dedicate a thread to blocking event reads so the frame loop never blocks
/// on input.
pub fn spawn_input_thread() -> std::io::Result<mpsc::Receiver<Event>> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::Builder::new()
        .name("paranoid-input".into())
        .spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("Terminal input failed: {}", e);
                    break;
                }
            }
        })?;
    Ok(rx)
}
