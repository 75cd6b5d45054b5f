//! In-memory surface: an RGB pixel layer plus a layer of glyph marks.
//!
//! Glyphs are kept as text rather than rasterised so the terminal
//! renderer can print them as real characters. The glyph layer sits above
//! the pixels: only a fill covering the whole canvas clears it, and
//! `copy_region` carries glyphs along with their pixels.

use image::RgbImage;

use super::{Color, Region, Surface};

/// A glyph drawn on the canvas, anchored at its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMark {
    pub text: String,
    pub cx: f32,
    pub cy: f32,
    pub size: u32,
    pub color: Color,
}

/// Software surface the renderer draws into.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbImage,
    glyphs: Vec<GlyphMark>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Canvas {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::new(width, height),
            glyphs: Vec::new(),
        }
    }

    /// Pixel colour at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        Some(Color::from(*self.pixels.get_pixel(x, y)))
    }

    /// Glyphs currently visible, in drawing order.
    pub fn glyphs(&self) -> &[GlyphMark] {
        &self.glyphs
    }

    /// The raw pixel layer.
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// True if every pixel equals `color` and no glyph is visible.
    pub fn is_uniform(&self, color: Color) -> bool {
        let target: image::Rgb<u8> = color.into();
        self.glyphs.is_empty() && self.pixels.pixels().all(|p| *p == target)
    }

    fn bounds(&self) -> Region {
        Region::new(0, 0, self.pixels.width(), self.pixels.height())
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbImage::new(width, height);
        self.glyphs.clear();
    }

    fn fill_rect(&mut self, rect: Region, color: Color) {
        let Some(area) = rect.clip(self.width(), self.height()) else {
            return;
        };

        let px: image::Rgb<u8> = color.into();
        for y in area.y as u32..area.y as u32 + area.height {
            for x in area.x as u32..area.x as u32 + area.width {
                self.pixels.put_pixel(x, y, px);
            }
        }

        if area == self.bounds() {
            self.glyphs.clear();
        }
    }

    fn fill_text(&mut self, text: &str, cx: f32, cy: f32, size: u32, color: Color) {
        if text.is_empty() || !self.bounds().contains(cx, cy) {
            return;
        }
        self.glyphs.push(GlyphMark {
            text: text.to_string(),
            cx,
            cy,
            size,
            color,
        });
    }

    fn copy_region(&mut self, src: Region, dx: i32, dy: i32) {
        let (width, height) = (self.width(), self.height());
        let Some(src) = src.clip(width, height) else {
            return;
        };
        let dest = Region::new(src.x + dx, src.y + dy, src.width, src.height);
        let Some(visible) = dest.clip(width, height) else {
            return;
        };

        // Read the whole source first so overlapping copies are safe
        let strip = image::imageops::crop_imm(
            &self.pixels,
            src.x as u32,
            src.y as u32,
            src.width,
            src.height,
        )
        .to_image();

        for y in visible.y..visible.y + visible.height as i32 {
            for x in visible.x..visible.x + visible.width as i32 {
                let sx = (x - dest.x) as u32;
                let sy = (y - dest.y) as u32;
                let px = *strip.get_pixel(sx, sy);
                self.pixels.put_pixel(x as u32, y as u32, px);
            }
        }

        let moved: Vec<GlyphMark> = self
            .glyphs
            .iter()
            .filter(|g| src.contains(g.cx, g.cy))
            .map(|g| GlyphMark {
                cx: g.cx + dx as f32,
                cy: g.cy + dy as f32,
                ..g.clone()
            })
            .filter(|g| visible.contains(g.cx, g.cy))
            .collect();

        self.glyphs.retain(|g| !visible.contains(g.cx, g.cy));
        self.glyphs.extend(moved);
    }
}
