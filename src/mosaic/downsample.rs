//! Box-filter downsampling from camera pixels to one colour per cell.

use crate::camera::Frame;
use crate::surface::Color;

/// Average the RGB pixels under each of `cols x rows` cells.
///
/// The whole frame is spread over the grid, so each cell covers
/// `width / cols` by `height / rows` source pixels. Results are written
/// row-major into `buffer`, which is cleared first and reused across
/// frames to keep the hot path allocation-free.
///
/// Returns the number of samples written (0 for empty input).
pub fn downsample_colors_into(
    frame: &Frame,
    cols: u32,
    rows: u32,
    buffer: &mut Vec<Color>,
) -> usize {
    buffer.clear();

    let img_width = frame.width;
    let img_height = frame.height;

    if cols == 0 || rows == 0 || img_width == 0 || img_height == 0 || frame.data.is_empty() {
        return 0;
    }

    let output_size = cols as usize * rows as usize;
    buffer.reserve(output_size);

    let cell_w = img_width as f32 / cols as f32;
    let cell_h = img_height as f32 / rows as f32;

    for cy in 0..rows {
        for cx in 0..cols {
            let start_x = (cx as f32 * cell_w) as u32;
            let start_y = (cy as f32 * cell_h) as u32;
            // Upscaling leaves cells narrower than a pixel; take at least one
            let end_x = ((((cx + 1) as f32 * cell_w) as u32).max(start_x + 1)).min(img_width);
            let end_y = ((((cy + 1) as f32 * cell_h) as u32).max(start_y + 1)).min(img_height);

            let mut sum_r = 0u32;
            let mut sum_g = 0u32;
            let mut sum_b = 0u32;
            let mut count = 0u32;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let idx = ((py * img_width + px) * 3) as usize;
                    if idx + 2 < frame.data.len() {
                        sum_r += frame.data[idx] as u32;
                        sum_g += frame.data[idx + 1] as u32;
                        sum_b += frame.data[idx + 2] as u32;
                        count += 1;
                    }
                }
            }

            buffer.push(if count > 0 {
                Color::new(
                    (sum_r / count) as u8,
                    (sum_g / count) as u8,
                    (sum_b / count) as u8,
                )
            } else {
                Color::BLACK
            });
        }
    }

    output_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_frame_averages_to_itself() {
        let frame = Frame::from_rgb([10u8, 20, 30].repeat(8 * 6), 8, 6);
        let mut buf = Vec::new();
        assert_eq!(downsample_colors_into(&frame, 4, 3, &mut buf), 12);
        assert!(buf.iter().all(|c| *c == Color::new(10, 20, 30)));
    }

    #[test]
    fn test_two_halves() {
        // 4x1: two red pixels then two blue pixels
        let frame = Frame::from_rgb(
            vec![255, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 255],
            4,
            1,
        );
        let mut buf = Vec::new();
        downsample_colors_into(&frame, 2, 1, &mut buf);
        assert_eq!(buf, vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]);
    }

    #[test]
    fn test_mixed_cell_is_averaged() {
        // 2x1 -> 1x1: black and white average to mid grey
        let frame = Frame::from_rgb(vec![0, 0, 0, 255, 255, 255], 2, 1);
        let mut buf = Vec::new();
        downsample_colors_into(&frame, 1, 1, &mut buf);
        assert_eq!(buf, vec![Color::new(127, 127, 127)]);
    }

    #[test]
    fn test_grid_larger_than_frame() {
        let frame = Frame::from_rgb(vec![200, 200, 200], 1, 1);
        let mut buf = Vec::new();
        assert_eq!(downsample_colors_into(&frame, 3, 2, &mut buf), 6);
        assert!(buf.iter().all(|c| *c == Color::new(200, 200, 200)));
    }

    #[test]
    fn test_empty_inputs() {
        let frame = Frame::from_rgb(Vec::new(), 0, 0);
        let mut buf = vec![Color::BLACK; 4];
        assert_eq!(downsample_colors_into(&frame, 2, 2, &mut buf), 0);
        assert!(buf.is_empty());

        let frame = Frame::from_rgb(vec![1, 2, 3], 1, 1);
        assert_eq!(downsample_colors_into(&frame, 0, 2, &mut buf), 0);
    }
}
