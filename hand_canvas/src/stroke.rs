//! Brush styles and the segment renderer.

use rand::Rng;
use tracing::trace;

use crate::canvas::Canvas;
use crate::geometry::{distance, lerp, Point};

/// Length of each drawn run, and of each gap, in a dashed stroke.
pub const DASH_LEN: f32 = 10.0;
/// Dots per spray call.
pub const SPRAY_DOTS: usize = 30;
/// Spray dots land within ±this many pixels of the pen on each axis.
pub const SPRAY_JITTER: i32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BrushStyle {
    #[default]
    Solid,
    Dashed,
    Spray,
}

impl BrushStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrushStyle::Solid  => "SOLID",
            BrushStyle::Dashed => "DASHED",
            BrushStyle::Spray  => "SPRAY",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BrushStyle::Solid  => BrushStyle::Dashed,
            BrushStyle::Dashed => BrushStyle::Spray,
            BrushStyle::Spray  => BrushStyle::Solid,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Thickness {
    #[default]
    Thin,
    Thick,
}

impl Thickness {
    pub fn pixels(self) -> u32 {
        match self {
            Thickness::Thin  => 5,
            Thickness::Thick => 10,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Thickness::Thin  => Thickness::Thick,
            Thickness::Thick => Thickness::Thin,
        }
    }
}

/// Rasterize one pen movement onto `canvas`.
///
/// * `Solid`: one line `start → end`.
/// * `Dashed`: 10 px on, 10 px off along the segment.  Segments shorter
///   than one pixel draw nothing.
/// * `Spray`: `start` is ignored; 30 one-pixel-radius dots scattered
///   around `end` using `rng`.
pub fn render_segment<R: Rng + ?Sized>(
    canvas:    &mut Canvas,
    color:     u32,
    start:     Point,
    end:       Point,
    thickness: u32,
    style:     BrushStyle,
    rng:       &mut R,
) {
    match style {
        BrushStyle::Solid  => canvas.draw_line(start, end, thickness, color),
        BrushStyle::Dashed => render_dashed(canvas, color, start, end, thickness),
        BrushStyle::Spray  => render_spray(canvas, color, end, rng),
    }
}

fn render_dashed(canvas: &mut Canvas, color: u32, start: Point, end: Point, thickness: u32) {
    if !(distance(start, end) >= 1.0) {
        trace!("dashed segment too short, skipped");
        return;
    }
    let margin = (thickness / 2) as f32 + 1.0;
    let Some((t0, t1)) = canvas.clip_segment(start, end, margin) else { return };

    let (dx, dy) = (end.x as f64 - start.x as f64, end.y as f64 - start.y as f64);
    let length = dx.hypot(dy);
    let dash   = DASH_LEN as f64;
    let period = dash * 2.0;

    // Dash phase is measured from `start`; skip straight to the first dash
    // that can reach the visible part.
    let mut d = (t0 * length / period).floor() * period;
    let stop  = (t1 * length).min(length.floor());
    while d < stop {
        let from = lerp(start, end, d / length);
        let to   = lerp(start, end, ((d + dash) / length).min(1.0));
        canvas.draw_line(from, to, thickness, color);
        d += period;
    }
}

fn render_spray<R: Rng + ?Sized>(canvas: &mut Canvas, color: u32, end: Point, rng: &mut R) {
    let (x, y) = end.to_pixel();
    for _ in 0..SPRAY_DOTS {
        let dx = rng.gen_range(-SPRAY_JITTER..=SPRAY_JITTER);
        let dy = rng.gen_range(-SPRAY_JITTER..=SPRAY_JITTER);
        canvas.fill_circle(x.saturating_add(dx), y.saturating_add(dy), 1, color);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::BACKGROUND;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const INK: u32 = 0xFF00FF00;

    fn rng() -> StdRng { StdRng::seed_from_u64(7) }

    fn draw(style: BrushStyle, start: Point, end: Point) -> Canvas {
        let mut c = Canvas::new(200, 200);
        render_segment(&mut c, INK, start, end, 1, style, &mut rng());
        c
    }

    #[test]
    fn solid_is_continuous() {
        let c = draw(BrushStyle::Solid, Point::new(10.0, 50.0), Point::new(109.0, 50.0));
        assert!((10..=109).all(|x| c.pixel(x, 50) == Some(INK)));
    }

    #[test]
    fn dashed_alternates_runs() {
        let c = draw(BrushStyle::Dashed, Point::new(10.0, 50.0), Point::new(110.0, 50.0));
        // Runs start at 10, 30, 50, 70, 90
        for run_start in [10, 30, 50, 70, 90] {
            assert_eq!(c.pixel(run_start + 5, 50), Some(INK), "run at {run_start}");
        }
        // Gaps in between
        for gap_mid in [25, 45, 65, 85] {
            assert_eq!(c.pixel(gap_mid, 50), Some(BACKGROUND), "gap at {gap_mid}");
        }
        assert!(c.count_color(INK) < 100);
    }

    #[test]
    fn dashed_stays_within_segment() {
        // 25 px long: one full run, then a gap, then the clamp keeps the
        // second run from overshooting the endpoint.
        let c = draw(BrushStyle::Dashed, Point::new(10.0, 50.0), Point::new(35.0, 50.0));
        assert_eq!(c.pixel(36, 50), Some(BACKGROUND));
        assert_eq!(c.pixel(40, 50), Some(BACKGROUND));
    }

    #[test]
    fn dashed_zero_length_draws_nothing() {
        let p = Point::new(60.0, 60.0);
        let c = draw(BrushStyle::Dashed, p, p);
        assert_eq!(c.count_color(INK), 0);
    }

    #[test]
    fn spray_ignores_start_and_stays_near_end() {
        let end = Point::new(100.0, 100.0);
        let c = draw(BrushStyle::Spray, Point::new(0.0, 0.0), end);
        let inked: Vec<(i32, i32)> = (0..200)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter(|&(x, y)| c.pixel(x, y) == Some(INK))
            .collect();
        assert!(!inked.is_empty());
        // Jitter ±10 plus dot radius 1
        assert!(inked.iter().all(|&(x, y)| (x - 100).abs() <= 11 && (y - 100).abs() <= 11));
        // Nothing near the ignored start point
        assert_eq!(c.pixel(0, 0), Some(BACKGROUND));
    }

    #[test]
    fn spray_scatters() {
        let c = draw(BrushStyle::Spray, Point::default(), Point::new(100.0, 100.0));
        // 30 plus-shaped dots over a 23×23 area can overlap, but not into one spot
        let n = c.count_color(INK);
        assert!(n > 20 && n <= SPRAY_DOTS * 5, "inked {n}");
    }

    #[test]
    fn spray_is_reproducible_with_seed() {
        let a = draw(BrushStyle::Spray, Point::default(), Point::new(80.0, 80.0));
        let b = draw(BrushStyle::Spray, Point::default(), Point::new(80.0, 80.0));
        assert_eq!(a, b);
    }

    #[test]
    fn thickness_toggle() {
        assert_eq!(Thickness::Thin.pixels(), 5);
        assert_eq!(Thickness::Thin.toggled().pixels(), 10);
        assert_eq!(Thickness::Thick.toggled(), Thickness::Thin);
    }

    #[test]
    fn wild_coordinates_are_clipped_not_fatal() {
        let origin = Point::new(0.0, 0.0);
        for style in [BrushStyle::Solid, BrushStyle::Dashed, BrushStyle::Spray] {
            let mut c = Canvas::new(200, 200);
            render_segment(&mut c, INK, origin, Point::new(f32::INFINITY, 0.0), 10, style, &mut rng());
            render_segment(&mut c, INK, origin, Point::new(1e12, 0.0), 10, style, &mut rng());
            render_segment(&mut c, INK, Point::new(-3e38, 5.0), Point::new(3e38, 5.0), 1, style, &mut rng());
            render_segment(&mut c, INK, origin, Point::new(f32::NAN, 0.0), 1, style, &mut rng());
        }
    }

    #[test]
    fn dashed_phase_survives_clipping() {
        let c = draw(BrushStyle::Dashed, Point::new(0.0, 50.0), Point::new(1e12, 50.0));
        assert_eq!(c.pixel(5, 50), Some(INK));
        assert_eq!(c.pixel(15, 50), Some(BACKGROUND));
        assert_eq!(c.pixel(25, 50), Some(INK));
        assert_eq!(c.pixel(195, 50), Some(BACKGROUND));
        assert_eq!(c.pixel(185, 50), Some(INK));

        // Entering from far off the left edge keeps the same 20 px rhythm.
        let c = draw(BrushStyle::Dashed, Point::new(-1e6, 50.0), Point::new(200.0, 50.0));
        assert_eq!(c.pixel(5, 50), Some(INK));
        assert_eq!(c.pixel(15, 50), Some(BACKGROUND));
    }
}
