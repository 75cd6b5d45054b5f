//! The mirror's terminal session: raw mode, alternate screen and the
//! ratatui terminal that draws into it.

use std::io::{self, Stdout};
use std::sync::atomic::Ordering;

use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::raw_mode::{install_panic_hook, restore_terminal, RAW_MODE_ACTIVE};
use super::rendering;
use crate::surface::Canvas;

/// Owns the terminal while the mirror runs.
///
/// The terminal is restored on [`Tui::restore`], on drop, or from the
/// panic hook if the process panics first.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether this TUI is responsible for cleanup
    active: bool,
}

impl Tui {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    /// Returns an error if stdout is not a terminal. Partial setup is
    /// undone before returning.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        let terminal = crossterm::execute!(stdout, EnterAlternateScreen)
            .and_then(|_| Terminal::new(CrosstermBackend::new(stdout)));
        match terminal {
            Ok(terminal) => Ok(Self {
                terminal,
                active: true,
            }),
            Err(e) => {
                let _ = restore_terminal();
                Err(e)
            }
        }
    }

    /// Draw one mirror screen; see [`rendering::render_mirror`].
    pub fn draw_mirror(&mut self, canvas: Option<&Canvas>, status: Option<&str>) -> io::Result<()> {
        self.terminal
            .draw(|frame| rendering::render_mirror(frame, canvas, status))?;
        Ok(())
    }

    /// Pick up a new terminal size before the next draw.
    pub fn resize(&mut self) -> io::Result<()> {
        self.terminal.autoresize()
    }

    /// Give the terminal back now. Dropping afterwards is a no-op.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            restore_terminal()?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            let _ = restore_terminal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_restore_is_idempotent() {
        // Needs a real TTY; CI has none
        match Tui::new() {
            Ok(mut tui) => {
                assert!(tui.is_active());
                assert!(RAW_MODE_ACTIVE.load(Ordering::SeqCst));
                tui.restore().expect("Should restore terminal");
                assert!(!tui.is_active());
                assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));
                tui.restore().expect("Second restore is a no-op");
            }
            Err(e) => {
                eprintln!("Skipping test (no TTY): {}", e);
                assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));
            }
        }
    }
}
