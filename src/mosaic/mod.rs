//! Mosaic rendering: camera frame in, pixelated glyph collage out.
//!
//! Each frame goes through the same steps:
//!
//! 1. **Grid** - cell size from the chaos level, columns/rows from the surface
//! 2. **Downsampling** - one averaged RGB sample per cell
//! 3. **Cell styling** - dark holes, flat blocks, or glyphs
//! 4. **Glitch** - an occasional horizontal tear at high chaos

mod downsample;
mod glitch;
mod glyphs;
mod grid;
mod renderer;
mod style;

pub use downsample::downsample_colors_into;
pub use glitch::{Tear, MAX_TEAR_HEIGHT, MAX_TEAR_SHIFT, TEAR_PROBABILITY};
pub use glyphs::{symbol_index, GlyphSet, BRAINROT_SYMBOLS, TECH_LOGOS};
pub use grid::Grid;
pub use renderer::{FrameSkip, MosaicRenderer, RenderStats, BACKGROUND};
pub use style::{choose_style, CellStyle, DARK_THRESHOLD, GLYPH_THRESHOLD};
