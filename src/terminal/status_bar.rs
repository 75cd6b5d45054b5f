//! One-line status bar under the mirror.

use crate::chaos::ChaosLevel;

/// Shown in the status bar once chaos passes the warning threshold.
pub const LEAKAGE_WARNING: &str = "WARNING: ATTENTION LEAKAGE DETECTED";

const GAUGE_WIDTH: usize = 10;

/// Status bar for the mirror: chaos gauge, cell size, source, hints.
#[derive(Debug, Clone)]
pub struct StatusBar {
    pub visible: bool,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn with_visibility(visible: bool) -> Self {
        Self { visible }
    }

    /// Format: ` CHAOS [#####-----] 0.50 | cell 15px | camera 0 | q to quit `
    pub fn format(&self, chaos: ChaosLevel, source_label: &str) -> String {
        let filled = ((chaos.value() * GAUGE_WIDTH as f32).round() as usize).min(GAUGE_WIDTH);
        let gauge = format!("{}{}", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled));

        let mut line = format!(
            " CHAOS [{}] {} | cell {}px | {} | q to quit ",
            gauge,
            chaos,
            chaos.cell_size(),
            source_label
        );
        if chaos.shows_warning() {
            line.push_str(&format!("| {} ", LEAKAGE_WARNING));
        }
        line
    }
}
