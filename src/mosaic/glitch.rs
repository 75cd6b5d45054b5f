//! Horizontal screen-tear effect.

use rand::Rng;

use crate::chaos::ChaosLevel;
use crate::surface::{Region, Surface};

/// Chance per frame of a tear once chaos is high enough.
pub const TEAR_PROBABILITY: f32 = 0.1;

/// Tallest strip a tear may move, in pixels.
pub const MAX_TEAR_HEIGHT: f32 = 50.0;

/// Largest horizontal displacement either way, in pixels.
pub const MAX_TEAR_SHIFT: f32 = 25.0;

/// One torn strip: rows `y .. y + height` shifted sideways by `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tear {
    pub y: i32,
    pub height: u32,
    pub offset: i32,
}

impl Tear {
    /// Roll for a tear on a surface `surface_height` pixels tall.
    ///
    /// Never tears at or below the glitch threshold.
    pub fn roll<R: Rng + ?Sized>(
        chaos: ChaosLevel,
        surface_height: u32,
        rng: &mut R,
    ) -> Option<Self> {
        if !chaos.glitch_eligible() {
            return None;
        }
        if rng.r#gen::<f32>() <= 1.0 - TEAR_PROBABILITY {
            return None;
        }

        let height = (rng.r#gen::<f32>() * MAX_TEAR_HEIGHT) as u32;
        let y = (rng.r#gen::<f32>() * surface_height as f32) as i32;
        let offset = ((rng.r#gen::<f32>() - 0.5) * 2.0 * MAX_TEAR_SHIFT) as i32;
        Some(Self { y, height, offset })
    }

    /// Copy the strip of the already-rendered output onto itself, shifted.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        let strip = Region::new(0, self.y, surface.width(), self.height);
        surface.copy_region(strip, self.offset, 0);
    }
}
