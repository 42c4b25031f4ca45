//! Persistent raster surface.
//!
//! A flat `Vec<u32>` of packed ARGB pixels (`0xAARRGGBB`), the same layout
//! `minifb` consumes, so the window can blit it without conversion.  Every
//! primitive takes signed coordinates and clips silently; nothing here can
//! fail.

use crate::geometry::{lerp, Point};

pub const CANVAS_W:   usize = 800;
pub const CANVAS_H:   usize = 600;
pub const BACKGROUND: u32   = 0xFF090009;

#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(CANVAS_W, CANVAS_H)
    }
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, pixels: vec![BACKGROUND; width * height] }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    /// Reset every pixel to [`BACKGROUND`].
    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Number of pixels exactly equal to `color`.
    pub fn count_color(&self, color: u32) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Packed RGB bytes, row-major, for image export.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter()
            .flat_map(|&p| [(p >> 16) as u8, (p >> 8) as u8, p as u8])
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    // ── Primitives ────────────────────────────────────────────────────────

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Filled disc: every pixel within `radius` of the center.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        if radius < 0
            || cx.saturating_add(radius) < 0
            || cy.saturating_add(radius) < 0
            || cx.saturating_sub(radius) >= self.width as i32
            || cy.saturating_sub(radius) >= self.height as i32
        {
            return;
        }
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Filled axis-aligned rectangle with top-left corner `(x, y)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        for row in y0..y1 {
            for col in x0..x1 {
                self.pixels[row as usize * self.width + col as usize] = color;
            }
        }
    }

    /// Portion of `start → end` inside the canvas grown by `margin` on every
    /// side, as parameters `(t0, t1)` along the segment.  `None` when the
    /// segment misses that area or has a non-finite coordinate.
    pub fn clip_segment(&self, start: Point, end: Point, margin: f32) -> Option<(f64, f64)> {
        if ![start.x, start.y, end.x, end.y].iter().all(|c| c.is_finite()) {
            return None;
        }
        let m = margin as f64;
        let (x0, y0) = (start.x as f64, start.y as f64);
        let (dx, dy) = (end.x as f64 - x0, end.y as f64 - y0);
        let (xmax, ymax) = (self.width as f64 + m, self.height as f64 + m);

        // Liang–Barsky against the four edges.
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [(-dx, x0 + m), (dx, xmax - x0), (-dy, y0 + m), (dy, ymax - y0)] {
            if p == 0.0 {
                if q < 0.0 { return None; }
            } else if p < 0.0 {
                t0 = t0.max(q / p);
            } else {
                t1 = t1.min(q / p);
            }
        }
        (t0 <= t1).then_some((t0, t1))
    }

    /// Straight line with round caps, `thickness` pixels across.
    ///
    /// The segment is clipped to the canvas (plus the brush radius) first,
    /// then walked with Bresenham, stamping a disc at each step when thicker
    /// than one pixel.  Coordinates truncate to pixels like every other
    /// primitive.
    pub fn draw_line(&mut self, start: Point, end: Point, thickness: u32, color: u32) {
        let radius = (thickness / 2) as i32;
        let Some((t0, t1)) = self.clip_segment(start, end, radius as f32 + 1.0) else {
            return;
        };
        let (mut x, mut y) = lerp(start, end, t0).to_pixel();
        let (x1, y1)       = lerp(start, end, t1).to_pixel();

        let dx =  (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if radius == 0 {
                self.set_pixel(x, y, color);
            } else {
                self.fill_circle(x, y, radius, color);
            }
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
