//! Frame-to-mosaic renderer.

use rand::Rng;

use super::downsample::downsample_colors_into;
use super::glitch::Tear;
use super::grid::Grid;
use super::style::{choose_style, CellStyle};
use crate::camera::Frame;
use crate::chaos::ChaosLevel;
use crate::surface::{Color, Region, Surface};

/// Background behind the mosaic and inside dark holes.
pub const BACKGROUND: Color = Color::BLACK;

/// Why a tick drew nothing. Both cases are retried on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameSkip {
    #[error("no fully decoded frame available")]
    NotReady,
    #[error("empty grid for {width}x{height} surface with {cell_size}px cells")]
    DegenerateGeometry {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

/// What one render pass drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub grid: Option<Grid>,
    pub blocks: usize,
    pub glyphs: usize,
    pub holes: usize,
    pub tear: Option<Tear>,
}

/// Turns video frames into mosaic images.
///
/// The random source is injected so draw-mode and glitch decisions can be
/// reproduced from a seed in tests. Symbol choice does not use it.
pub struct MosaicRenderer<R> {
    rng: R,
    samples: Vec<Color>,
}

impl<R: Rng> MosaicRenderer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            samples: Vec::new(),
        }
    }

    /// Render `frame` onto `surface`.
    ///
    /// The surface is resized to the frame when they differ, fully
    /// cleared, then painted cell by cell in row-major order. A tear may
    /// follow when chaos is high.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        frame: &Frame,
        chaos: ChaosLevel,
        seconds: f64,
        surface: &mut S,
    ) -> Result<RenderStats, FrameSkip> {
        if !frame.is_complete() {
            return Err(FrameSkip::NotReady);
        }
        if surface.width() != frame.width || surface.height() != frame.height {
            log::debug!("Resizing output surface to {}x{}", frame.width, frame.height);
            surface.resize(frame.width, frame.height);
        }

        let (width, height) = (surface.width(), surface.height());
        let cell_size = chaos.cell_size();
        let grid = Grid::fit(width, height, cell_size).ok_or(FrameSkip::DegenerateGeometry {
            width,
            height,
            cell_size,
        })?;

        downsample_colors_into(frame, grid.cols, grid.rows, &mut self.samples);
        if self.samples.len() != grid.len() {
            return Err(FrameSkip::NotReady);
        }

        surface.fill_rect(Region::new(0, 0, width, height), BACKGROUND);

        let mut stats = RenderStats {
            grid: Some(grid),
            ..RenderStats::default()
        };
        let block = cell_size.saturating_sub(1);
        let half = cell_size as f32 / 2.0;

        for y in 0..grid.rows {
            for x in 0..grid.cols {
                let color = self.samples[(y * grid.cols + x) as usize];
                let (px, py) = grid.origin(x, y);

                match choose_style(color, x, y, seconds, chaos, &mut self.rng) {
                    CellStyle::Hole => stats.holes += 1,
                    CellStyle::Block => {
                        // One pixel short on each side leaves a grid line
                        surface.fill_rect(Region::new(px, py, block, block), color);
                        stats.blocks += 1;
                    }
                    CellStyle::Glyph(symbol) => {
                        let (cx, cy) = (px as f32 + half, py as f32 + half);
                        surface.fill_text(symbol, cx, cy, cell_size, color);
                        stats.glyphs += 1;
                    }
                }
            }
        }

        if let Some(tear) = Tear::roll(chaos, height, &mut self.rng) {
            log::trace!("Glitch tear {:?}", tear);
            tear.apply(surface);
            stats.tear = Some(tear);
        }

        Ok(stats)
    }
}
