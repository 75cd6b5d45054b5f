//! Per-cell drawing decision.

use rand::Rng;

use super::glyphs::GlyphSet;
use crate::chaos::ChaosLevel;
use crate::surface::Color;

/// Cells dimmer than this are left as background.
pub const DARK_THRESHOLD: f32 = 30.0;

/// Only cells brighter than this may become glyphs.
pub const GLYPH_THRESHOLD: f32 = 100.0;

/// How a single cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Too dark; the background shows through.
    Hole,
    /// Flat colour swatch.
    Block,
    /// A symbol from one of the glyph sets.
    Glyph(&'static str),
}

/// Decide how cell `(x, y)` with average colour `color` is drawn.
///
/// Dark cells are always holes and dim cells always blocks. Bright cells
/// become glyphs with probability `chaos * 0.8`; the set is a coin flip
/// and the symbol within it is fixed by position and time.
pub fn choose_style<R: Rng + ?Sized>(
    color: Color,
    x: u32,
    y: u32,
    seconds: f64,
    chaos: ChaosLevel,
    rng: &mut R,
) -> CellStyle {
    let brightness = color.brightness();
    if brightness < DARK_THRESHOLD {
        return CellStyle::Hole;
    }
    if brightness <= GLYPH_THRESHOLD || rng.r#gen::<f32>() >= chaos.glyph_probability() {
        return CellStyle::Block;
    }

    let set = if rng.gen_bool(0.5) {
        GlyphSet::Brainrot
    } else {
        GlyphSet::TechLogo
    };
    CellStyle::Glyph(set.symbol_at(x, y, seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::{BRAINROT_SYMBOLS, TECH_LOGOS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey(v: u8) -> Color {
        Color::new(v, v, v)
    }

    #[test]
    fn test_dark_cells_are_holes_for_any_chaos_and_seed() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for level in [0.1, 0.5, 1.0] {
                for v in [0u8, 10, 29] {
                    let style = choose_style(grey(v), 1, 1, 0.0, ChaosLevel::new(level), &mut rng);
                    assert_eq!(style, CellStyle::Hole);
                }
            }
        }
    }

    #[test]
    fn test_dim_cells_are_always_blocks() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            for v in [30u8, 64, 100] {
                let style = choose_style(grey(v), 2, 3, 1.0, ChaosLevel::new(1.0), &mut rng);
                assert_eq!(style, CellStyle::Block);
            }
        }
    }

    #[test]
    fn test_brightness_threshold_uses_mean() {
        let mut rng = StdRng::seed_from_u64(1);
        let chaos = ChaosLevel::new(1.0);
        // mean 30 exactly is not dark
        let style = choose_style(Color::new(90, 0, 0), 0, 0, 0.0, chaos, &mut rng);
        assert_eq!(style, CellStyle::Block);
        // mean 29.67 is dark
        let style = choose_style(Color::new(89, 0, 0), 0, 0, 0.0, chaos, &mut rng);
        assert_eq!(style, CellStyle::Hole);
    }

    #[test]
    fn test_bright_cells_mix_glyphs_and_blocks() {
        let mut rng = StdRng::seed_from_u64(42);
        let chaos = ChaosLevel::new(1.0);
        let mut glyphs = 0;
        let trials = 4000;
        for i in 0..trials {
            match choose_style(grey(200), i % 30, i / 30, 0.5, chaos, &mut rng) {
                CellStyle::Glyph(_) => glyphs += 1,
                CellStyle::Block => {}
                CellStyle::Hole => panic!("bright cell became a hole"),
            }
        }
        // Expected rate is 0.8
        let rate = glyphs as f32 / trials as f32;
        assert!((0.75..0.85).contains(&rate), "glyph rate {}", rate);
    }

    #[test]
    fn test_glyph_rate_follows_chaos() {
        let mut rng = StdRng::seed_from_u64(9);
        let chaos = ChaosLevel::new(0.1);
        let trials = 4000;
        let glyphs = (0..trials)
            .filter(|_| {
                matches!(
                    choose_style(grey(255), 1, 1, 0.0, chaos, &mut rng),
                    CellStyle::Glyph(_)
                )
            })
            .count();
        // Expected rate is 0.08
        let rate = glyphs as f32 / trials as f32;
        assert!((0.05..0.11).contains(&rate), "glyph rate {}", rate);
    }

    #[test]
    fn test_glyph_sets_are_a_coin_flip() {
        let mut rng = StdRng::seed_from_u64(2024);
        let chaos = ChaosLevel::new(1.0);
        let (mut brainrot, mut tech) = (0, 0);
        for i in 0..4000u32 {
            match choose_style(grey(230), i % 40, i / 40, i as f64 * 0.01, chaos, &mut rng) {
                CellStyle::Glyph(symbol) if BRAINROT_SYMBOLS.contains(&symbol) => brainrot += 1,
                CellStyle::Glyph(symbol) if TECH_LOGOS.contains(&symbol) => tech += 1,
                CellStyle::Glyph(symbol) => panic!("{} is in neither set", symbol),
                _ => {}
            }
        }

        let total = (brainrot + tech) as f32;
        assert!(total > 2500.0, "only {} glyphs", total);
        let share = brainrot as f32 / total;
        assert!((0.45..0.55).contains(&share), "brainrot share {}", share);
    }
}
