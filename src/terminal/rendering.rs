//! Rendering of the mirror screen onto a ratatui frame.
//!
//! Each terminal cell shows two canvas pixels stacked vertically using the
//! upper half block (`▀`, foreground = top, background = bottom) in 24-bit
//! colour. Glyphs from the canvas text layer are written on top at the
//! cell under their centre.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color as TermColor, Style};
use ratatui::widgets::{Paragraph, Widget};

use crate::mosaic::BACKGROUND;
use crate::surface::{Canvas, Color, Surface};

/// Shown until the first mosaic frame exists.
pub const INITIALIZING_TEXT: &str = "INITIALIZING SENSOR ARRAY...";

const UPPER_HALF: char = '▀';

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb(c.r, c.g, c.b)
}

/// Placement of a canvas inside a terminal area, preserving aspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Terminal columns per canvas pixel (also half-rows per pixel).
    pub scale: f32,
    pub cols: u16,
    pub rows: u16,
    pub x_offset: u16,
    pub y_offset: u16,
}

impl Viewport {
    /// Fit a `canvas_w x canvas_h` image into `cols x rows` terminal cells.
    pub fn fit(canvas_w: u32, canvas_h: u32, cols: u16, rows: u16) -> Option<Self> {
        if canvas_w == 0 || canvas_h == 0 || cols == 0 || rows == 0 {
            return None;
        }

        // Two vertical pixels per row
        let scale = (cols as f32 / canvas_w as f32).min((rows as f32 * 2.0) / canvas_h as f32);
        let out_cols = ((canvas_w as f32 * scale).floor() as u16).clamp(1, cols);
        let out_rows = ((canvas_h as f32 * scale / 2.0).floor() as u16).clamp(1, rows);

        Some(Self {
            scale,
            cols: out_cols,
            rows: out_rows,
            x_offset: (cols - out_cols) / 2,
            y_offset: (rows - out_rows) / 2,
        })
    }

    /// Canvas pixel sampled for terminal column `tx` and half-row `half_row`.
    fn sample_point(&self, tx: u16, half_row: u32) -> (u32, u32) {
        let x = ((tx as f32 + 0.5) / self.scale) as u32;
        let y = ((half_row as f32 + 0.5) / self.scale) as u32;
        (x, y)
    }

    /// Terminal cell (0-based, relative to the viewport) under a canvas point.
    fn cell_for(&self, cx: f32, cy: f32) -> Option<(u16, u16)> {
        let tx = (cx * self.scale).floor();
        let ty = (cy * self.scale / 2.0).floor();
        if tx < 0.0 || ty < 0.0 || tx >= self.cols as f32 || ty >= self.rows as f32 {
            return None;
        }
        Some((tx as u16, ty as u16))
    }
}

/// Widget that draws a [`Canvas`] as half blocks with its glyphs on top.
pub struct MosaicView<'a> {
    canvas: &'a Canvas,
}

impl<'a> MosaicView<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }
}

impl Widget for MosaicView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let Some(view) = Viewport::fit(width, height, area.width, area.height) else {
            return;
        };
        let (left, top) = (area.x + view.x_offset, area.y + view.y_offset);

        for ty in 0..view.rows {
            for tx in 0..view.cols {
                let (ux, uy) = view.sample_point(tx, ty as u32 * 2);
                let (lx, ly) = view.sample_point(tx, ty as u32 * 2 + 1);
                let upper = self.canvas.pixel(ux, uy).unwrap_or(BACKGROUND);
                let lower = self.canvas.pixel(lx, ly).unwrap_or(BACKGROUND);
                if let Some(cell) = buf.cell_mut((left + tx, top + ty)) {
                    cell.set_char(UPPER_HALF)
                        .set_fg(term_color(upper))
                        .set_bg(term_color(lower));
                }
            }
        }

        for mark in self.canvas.glyphs() {
            let Some((tx, ty)) = view.cell_for(mark.cx, mark.cy) else {
                continue;
            };
            let style = Style::default()
                .fg(term_color(mark.color))
                .bg(term_color(BACKGROUND));
            // Clipped at the image's right edge; a wide glyph that doesn't fit is dropped
            let room = (view.cols - tx) as usize;
            buf.set_stringn(left + tx, top + ty, &mark.text, room, style);
        }
    }
}

/// Render the status line on the last row of `area`.
pub fn render_status_bar(frame: &mut ratatui::Frame, status: &str, area: Rect) {
    if area.height == 0 {
        return;
    }
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    let status_paragraph =
        Paragraph::new(status).style(Style::default().fg(TermColor::Black).bg(TermColor::White));
    frame.render_widget(status_paragraph, status_area);
}

fn render_placeholder(frame: &mut ratatui::Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    let placeholder = Paragraph::new(INITIALIZING_TEXT).alignment(Alignment::Center);
    frame.render_widget(placeholder, line);
}

/// Render a complete mirror screen.
///
/// Without a rendered frame the placeholder is shown. The status line, if
/// any, takes the bottom row.
pub fn render_mirror(frame: &mut ratatui::Frame, canvas: Option<&Canvas>, status: Option<&str>) {
    let area = frame.area();
    let main_area = if status.is_some() {
        Rect {
            height: area.height.saturating_sub(1),
            ..area
        }
    } else {
        area
    };

    match canvas {
        Some(canvas) => frame.render_widget(MosaicView::new(canvas), main_area),
        None => render_placeholder(frame, main_area),
    }

    if let Some(line) = status {
        render_status_bar(frame, line, area);
    }
}
