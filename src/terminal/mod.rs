//! Terminal handling: the TUI session, mirror rendering and the status line.

mod raw_mode;
mod rendering;
mod status_bar;
mod tui;

pub use raw_mode::{install_panic_hook, restore_terminal};
pub use rendering::{render_mirror, render_status_bar, MosaicView, Viewport, INITIALIZING_TEXT};
pub use status_bar::{StatusBar, LEAKAGE_WARNING};
pub use tui::Tui;
