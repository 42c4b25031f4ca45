//! Cooldown-gated color cycling, and the palette it cycles through.
//!
//! Unlike the hold machines there is no minimum hold: the first eligible
//! frame fires immediately, then the gate stays shut for [`COOLDOWN_FRAMES`]
//! frames.  Sustained thumb rotation therefore steps through the palette at
//! roughly one color per 30 frames.

/// Frames the gate stays closed after a color change.
pub const COOLDOWN_FRAMES: u32 = 30;

/// Fixed drawing palette, packed ARGB (`0xAARRGGBB`).
pub const PALETTE: [u32; 4] = [
    0xFFFF0000, // red
    0xFF0000FF, // blue
    0xFF00FF00, // green
    0xFFFFFFFF, // white
];

#[derive(Clone, Debug, Default)]
pub struct ColorCycle {
    cooldown: u32,
}

impl ColorCycle {
    pub fn new() -> Self {
        ColorCycle { cooldown: 0 }
    }

    pub fn cooldown(&self) -> u32 { self.cooldown }

    /// Advance one frame.  Returns `true` when the color should change.
    pub fn tick(&mut self, eligible: bool) -> bool {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
        if self.cooldown == 0 && eligible {
            self.cooldown = COOLDOWN_FRAMES;
            return true;
        }
        false
    }
}

/// Next palette index, wrapping after the last color.
pub fn next_color(index: usize) -> usize {
    (index + 1) % PALETTE.len()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
