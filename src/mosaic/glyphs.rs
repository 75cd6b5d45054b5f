//! Glyph sets that replace bright mosaic cells.

/// Pictograms for the "brainrot" look.
pub const BRAINROT_SYMBOLS: &[&str] = &[
    "📱", "👁️", "💀", "🤡", "🤖", "💩", "👾", "💸", "💊", "🚧", "🔒", "📉",
];

/// Short stand-ins for platform logos.
pub const TECH_LOGOS: &[&str] = &["X", "f", "G", "in", "tt", "yt"];

/// Which of the two fixed symbol sets a glyph comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSet {
    Brainrot,
    TechLogo,
}

impl GlyphSet {
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            GlyphSet::Brainrot => BRAINROT_SYMBOLS,
            GlyphSet::TechLogo => TECH_LOGOS,
        }
    }

    /// Pick the symbol for cell `(x, y)` at `seconds`.
    ///
    /// The index is `floor(|sin(x*y + t) * 100|) mod len`: reproducible for
    /// a given cell and time, and flickering as time moves on.
    pub fn symbol_at(self, x: u32, y: u32, seconds: f64) -> &'static str {
        let symbols = self.symbols();
        symbols[symbol_index(x, y, seconds, symbols.len())]
    }
}

/// Position- and time-seeded index into a set of `len` symbols.
pub fn symbol_index(x: u32, y: u32, seconds: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let seed = ((x as f64) * (y as f64) + seconds).sin();
    let scaled = (seed * 100.0).abs().floor();
    if scaled.is_finite() {
        scaled as usize % len
    } else {
        0
    }
}
