//! Drawable output surfaces.
//!
//! The mosaic only needs three primitives from its output: fill a
//! rectangle, draw centred text, and copy a region of itself onto itself.
//! [`Surface`] names exactly those; [`Canvas`] is the in-memory surface the
//! terminal renderer reads from.

mod canvas;
mod color;

pub use canvas::{Canvas, GlyphMark};
pub use color::Color;

/// Axis-aligned pixel rectangle. May extend past the surface; drawing clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && py >= self.y as f32
            && px < self.x as f32 + self.width as f32
            && py < self.y as f32 + self.height as f32
    }

    /// The part of this region inside a `width x height` surface, if any.
    pub fn clip(&self, width: u32, height: u32) -> Option<Region> {
        let x0 = self.x.max(0) as i64;
        let y0 = self.y.max(0) as i64;
        let x1 = (self.x as i64 + self.width as i64).min(width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Region::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// A 2D drawable owned by the renderer.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Change the pixel size. Contents are reset to black.
    fn resize(&mut self, width: u32, height: u32);

    /// Paint a solid rectangle, clipped to the surface.
    fn fill_rect(&mut self, rect: Region, color: Color);

    /// Draw `text` centred on `(cx, cy)` at `size` pixels.
    fn fill_text(&mut self, text: &str, cx: f32, cy: f32, size: u32, color: Color);

    /// Copy the pixels under `src` onto the surface, moved by `(dx, dy)`.
    ///
    /// Source and destination may overlap; the source is read before
    /// anything is written.
    fn copy_region(&mut self, src: Region, dx: i32, dy: i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_clip_inside() {
        let r = Region::new(2, 3, 4, 5);
        assert_eq!(r.clip(100, 100), Some(r));
    }

    #[test]
    fn test_region_clip_partial() {
        let r = Region::new(-5, 8, 10, 10);
        assert_eq!(r.clip(20, 12), Some(Region::new(0, 8, 5, 4)));
    }

    #[test]
    fn test_region_clip_outside() {
        assert_eq!(Region::new(30, 0, 5, 5).clip(20, 20), None);
        assert_eq!(Region::new(0, 0, 0, 5).clip(20, 20), None);
    }

    #[test]
    fn test_region_contains_is_half_open() {
        let r = Region::new(0, 0, 10, 10);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(9.5, 9.5));
        assert!(!r.contains(10.0, 5.0));
    }
}
