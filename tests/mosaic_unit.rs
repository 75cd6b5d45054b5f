//! Property tests for the mosaic renderer, driven through the public API.
//!
//! - Chaos level and cell size ranges over a full day
//! - Dark cells are holes, dim cells are blocks, never glyphs
//! - Tears only above the glitch threshold
//! - A black frame renders as pure background

use rand::rngs::StdRng;
use rand::SeedableRng;
use time_mosaic::camera::Frame;
use time_mosaic::chaos::ChaosLevel;
use time_mosaic::mosaic::{MosaicRenderer, BACKGROUND};
use time_mosaic::surface::{Canvas, Color, Surface};

const CHAOS_LEVELS: [f32; 6] = [0.1, 0.3, 0.5, 0.6, 0.8, 1.0];

fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
    Frame::from_rgb(rgb.repeat((width * height) as usize), width, height)
}

/// Left half `left`, right half `right`.
fn split_frame(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> Frame {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            data.extend_from_slice(if x < width / 2 { &left } else { &right });
        }
    }
    Frame::from_rgb(data, width, height)
}

// ==================== Chaos Level ====================

#[test]
fn test_chaos_scenarios() {
    let idle = ChaosLevel::from_screen_time(0.0);
    assert_eq!(idle.value(), 0.1);
    assert_eq!(idle.cell_size(), 19);
    assert!(!idle.glitch_eligible());

    let saturated = ChaosLevel::from_screen_time(12.0);
    assert_eq!(saturated.value(), 1.0);
    assert_eq!(saturated.cell_size(), 10);
    assert!(saturated.glitch_eligible());
}

#[test]
fn test_cell_size_non_increasing_in_chaos() {
    let mut prev = u32::MAX;
    for minutes in 0..=(24 * 60) {
        let chaos = ChaosLevel::from_screen_time(minutes as f32 / 60.0);
        let cell = chaos.cell_size();
        assert!((10..=19).contains(&cell));
        assert!(cell <= prev, "cell grew at {} minutes", minutes);
        prev = cell;
    }
}

// ==================== Cell Styles ====================

#[test]
fn test_dark_cells_never_drawn() {
    let frame = solid_frame(120, 90, [29, 29, 29]);
    for &level in &CHAOS_LEVELS {
        for seed in 0..20 {
            let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(seed));
            let mut canvas = Canvas::default();
            let stats = renderer
                .render(&frame, ChaosLevel::new(level), seed as f64, &mut canvas)
                .unwrap();

            assert_eq!(stats.blocks, 0);
            assert_eq!(stats.glyphs, 0);
            assert!(canvas.is_uniform(BACKGROUND), "chaos {} seed {}", level, seed);
        }
    }
}

#[test]
fn test_dim_cells_always_blocks() {
    // Brightness exactly 100 is still below the glyph cut-off
    for rgb in [[30, 30, 30], [100, 100, 100], [255, 45, 0]] {
        let frame = solid_frame(100, 100, rgb);
        for &level in &CHAOS_LEVELS {
            for seed in 0..10 {
                let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(seed));
                let mut canvas = Canvas::default();
                let stats = renderer
                    .render(&frame, ChaosLevel::new(level), 1.5, &mut canvas)
                    .unwrap();

                let grid = stats.grid.unwrap();
                assert_eq!(stats.glyphs, 0);
                assert_eq!(stats.holes, 0);
                assert_eq!(stats.blocks, grid.len());
                assert!(canvas.glyphs().is_empty());
            }
        }
    }
}

#[test]
fn test_glyphs_only_where_bright() {
    // 15px cells line up with the split at x = 90; no tears at 0.5
    let frame = split_frame(180, 90, [0, 0, 0], [250, 250, 250]);
    let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(5));
    let mut canvas = Canvas::default();

    let mut total = 0;
    for tick in 0..30 {
        let stats = renderer
            .render(&frame, ChaosLevel::new(0.5), tick as f64 / 30.0, &mut canvas)
            .unwrap();
        total += stats.glyphs;
        for mark in canvas.glyphs() {
            assert!(mark.cx >= 90.0, "glyph at x={} on dark side", mark.cx);
            assert_eq!(mark.color, Color::new(250, 250, 250));
        }
    }
    assert!(total > 0, "bright half should produce some glyphs");
}

// ==================== Glitch ====================

#[test]
fn test_no_tears_at_or_below_threshold() {
    let frame = solid_frame(160, 120, [200, 120, 60]);
    for level in [0.1, 0.45, 0.6] {
        let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(21));
        let mut canvas = Canvas::default();
        for tick in 0..500 {
            let stats = renderer
                .render(&frame, ChaosLevel::new(level), tick as f64, &mut canvas)
                .unwrap();
            assert!(stats.tear.is_none(), "tear at chaos {}", level);
        }
    }
}

#[test]
fn test_tears_happen_at_full_chaos() {
    let frame = solid_frame(160, 120, [200, 120, 60]);
    let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(21));
    let mut canvas = Canvas::default();

    let mut tears = 0;
    for tick in 0..500 {
        let stats = renderer
            .render(&frame, ChaosLevel::new(1.0), tick as f64, &mut canvas)
            .unwrap();
        if let Some(tear) = stats.tear {
            tears += 1;
            assert!(tear.height < 50);
            assert!((-25..=25).contains(&tear.offset));
            assert!(tear.y >= 0 && tear.y < 120);
        }
    }
    // Expect about 50
    assert!((15..=100).contains(&tears), "{} tears in 500 ticks", tears);
}

// ==================== Whole Frames ====================

#[test]
fn test_black_frame_is_pure_background() {
    let frame = solid_frame(64, 48, [0, 0, 0]);
    for &level in &CHAOS_LEVELS {
        let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(9));
        let mut canvas = Canvas::new(10, 10);
        for tick in 0..50 {
            let stats = renderer
                .render(&frame, ChaosLevel::new(level), tick as f64, &mut canvas)
                .unwrap();
            assert_eq!(stats.blocks + stats.glyphs, 0);
        }
        assert_eq!((canvas.width(), canvas.height()), (64, 48));
        assert!(canvas.is_uniform(BACKGROUND));
    }
}

#[test]
fn test_each_frame_replaces_the_last() {
    let bright = solid_frame(40, 40, [90, 90, 90]);
    let black = solid_frame(40, 40, [0, 0, 0]);
    let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(1));
    let mut canvas = Canvas::default();

    renderer
        .render(&bright, ChaosLevel::new(0.1), 0.0, &mut canvas)
        .unwrap();
    assert!(!canvas.is_uniform(BACKGROUND));

    renderer
        .render(&black, ChaosLevel::new(0.1), 0.1, &mut canvas)
        .unwrap();
    assert!(canvas.is_uniform(BACKGROUND));
}

#[test]
fn test_same_seed_same_picture() {
    let frame = split_frame(120, 80, [40, 200, 90], [250, 240, 230]);
    let draw = |seed: u64| {
        let mut renderer = MosaicRenderer::new(StdRng::seed_from_u64(seed));
        let mut canvas = Canvas::default();
        renderer
            .render(&frame, ChaosLevel::new(1.0), 2.0, &mut canvas)
            .unwrap();
        canvas
    };

    let (a, b) = (draw(77), draw(77));
    assert_eq!(a.pixels(), b.pixels());
    assert_eq!(a.glyphs(), b.glyphs());
}
