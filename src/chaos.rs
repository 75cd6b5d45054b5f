//! Chaos intensity derived from daily screen time.
//!
//! Everything stochastic in the mosaic scales with a single number in
//! `[0.1, 1.0]`: grid coarseness, how often bright cells turn into
//! glyphs, and whether the screen may tear.

use std::fmt;

/// Hours of screen time that saturate the chaos scale.
pub const SATURATION_HOURS: f32 = 12.0;

/// Lowest chaos level; even zero screen time gets a little noise.
pub const MIN_CHAOS: f32 = 0.1;

/// Highest chaos level.
pub const MAX_CHAOS: f32 = 1.0;

/// Chaos above this level makes glitch tears possible.
pub const GLITCH_THRESHOLD: f32 = 0.6;

/// Chaos above this level raises the on-screen leakage warning.
pub const WARNING_THRESHOLD: f32 = 0.5;

/// Normalised rendering intensity, always within `[0.1, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ChaosLevel(f32);

impl ChaosLevel {
    /// `clamp(hours / 12, 0.1, 1.0)`. Non-finite input maps to the minimum.
    pub fn from_screen_time(hours: f32) -> Self {
        if !hours.is_finite() {
            return Self(MIN_CHAOS);
        }
        Self((hours / SATURATION_HOURS).clamp(MIN_CHAOS, MAX_CHAOS))
    }

    /// Clamp an arbitrary level into range.
    pub fn new(level: f32) -> Self {
        if !level.is_finite() {
            return Self(MIN_CHAOS);
        }
        Self(level.clamp(MIN_CHAOS, MAX_CHAOS))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Side length of one mosaic cell in pixels: `floor(20 - chaos * 10)`.
    ///
    /// Higher chaos gives smaller cells and a denser, noisier grid.
    pub fn cell_size(self) -> u32 {
        (20.0 - self.0 * 10.0).floor() as u32
    }

    /// Probability that a bright cell is drawn as a glyph.
    pub fn glyph_probability(self) -> f32 {
        self.0 * 0.8
    }

    /// Whether glitch tears may happen at this level.
    pub fn glitch_eligible(self) -> bool {
        self.0 > GLITCH_THRESHOLD
    }

    pub fn shows_warning(self) -> bool {
        self.0 > WARNING_THRESHOLD
    }
}

impl Default for ChaosLevel {
    fn default() -> Self {
        Self(MIN_CHAOS)
    }
}

impl fmt::Display for ChaosLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
