//! Archimedean spiral of candidate placement centers.
//!
//! The path starts at the canvas center and then walks `r = a + b·θ`
//! outwards in steps of 0.1°.  It ends once the offset from the center has
//! passed the canvas extent in all four directions (north, east, south,
//! west).  Each direction flag is sticky until [`SpiralPath::reset`].

use std::f64::consts::PI;

/// Angle increment between consecutive spiral points (0.1° in radians).
pub const ANGLE_STEP: f64 = 0.1 * PI / 180.0;

/// Base radius used by the placement engine.
pub const DEFAULT_BASE_RADIUS: f64 = 2.0;

/// Radial growth per radian used by the placement engine.
pub const DEFAULT_GROWTH: f64 = 5.0;

/// Integer pixel position on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which canvas limits the spiral has already crossed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Crossed {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
}

impl Crossed {
    #[inline]
    fn all(&self) -> bool {
        self.north && self.east && self.south && self.west
    }
}

/// Deterministic, finite sequence of candidate centers.
///
/// Implements [`Iterator`]; after exhaustion it keeps returning `None` until
/// [`reset`](SpiralPath::reset) rewinds it to the center.
#[derive(Clone, Debug)]
pub struct SpiralPath {
    width: f64,
    height: f64,
    center: Point,
    /// Base radius.
    a: f64,
    /// Radial growth rate.
    b: f64,
    /// Current angle in radians.
    n: f64,
    crossed: Crossed,
    initialized: bool,
}

impl SpiralPath {
    /// Create a spiral for a `width × height` canvas.
    ///
    /// `growth` must be positive so the radius eventually leaves the canvas.
    pub fn new(base_radius: f64, growth: f64, width: u32, height: u32) -> Self {
        assert!(growth > 0.0, "spiral growth must be positive");
        Self {
            width: width as f64,
            height: height as f64,
            center: Point::new((width / 2) as i32, (height / 2) as i32),
            a: base_radius,
            b: growth,
            n: 0.0,
            crossed: Crossed::default(),
            initialized: false,
        }
    }

    /// Spiral with the engine's default radius and growth.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self::new(DEFAULT_BASE_RADIUS, DEFAULT_GROWTH, width, height)
    }

    /// The point every sweep starts from.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Rewind to the center with all direction flags cleared.
    pub fn reset(&mut self) {
        self.crossed = Crossed::default();
        self.initialized = false;
        self.n = 0.0;
    }

    /// Whether the sweep has ended.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.initialized && self.crossed.all()
    }
}

impl Iterator for SpiralPath {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if !self.initialized {
            self.initialized = true;
            return Some(self.center);
        }

        if self.crossed.all() {
            return None;
        }

        let r = self.a + self.b * self.n;
        let x = r * self.n.cos();
        let y = r * self.n.sin();

        // Limits are checked on the offset against the full extent, so the
        // sweep keeps going until its radius reaches the far canvas edges.
        if x >= self.width {
            self.crossed.east = true;
        }
        if x < 0.0 {
            self.crossed.west = true;
        }
        if y >= self.height {
            self.crossed.south = true;
        }
        if y < 0.0 {
            self.crossed.north = true;
        }
        self.n += ANGLE_STEP;

        Some(Point::new(
            x as i32 + self.center.x,
            y as i32 + self.center.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_point_is_center() {
        let mut s = SpiralPath::for_canvas(200, 200);
        assert_eq!(s.next(), Some(Point::new(100, 100)));
    }

    #[test]
    fn test_center_uses_integer_division() {
        let s = SpiralPath::for_canvas(201, 99);
        assert_eq!(s.center(), Point::new(100, 49));
    }

    #[test]
    fn test_second_point_is_base_radius_east() {
        let mut s = SpiralPath::for_canvas(200, 200);
        s.next();
        // θ = 0 → r = a = 2, offset (2, 0).
        assert_eq!(s.next(), Some(Point::new(102, 100)));
    }

    #[test]
    fn test_terminates() {
        let mut s = SpiralPath::for_canvas(50, 50);
        let count = s.by_ref().take(1_000_000).count();
        assert!(count < 1_000_000, "spiral did not terminate");
        assert!(s.is_exhausted());
        assert_eq!(s.next(), None);
        assert_eq!(s.next(), None);
    }

    #[test]
    fn test_terminates_on_degenerate_canvas() {
        let s = SpiralPath::new(0.0, 0.5, 0, 0);
        assert!(s.take(1_000_000).count() < 1_000_000);
    }

    #[test]
    fn test_sweep_radius_passes_half_diagonal() {
        let (w, h) = (80u32, 60u32);
        let spiral = SpiralPath::for_canvas(w, h);
        let c = spiral.center();
        let max_sq = spiral
            .map(|p| {
                let dx = (p.x - c.x) as i64;
                let dy = (p.y - c.y) as i64;
                dx * dx + dy * dy
            })
            .max()
            .unwrap();
        // Half-diagonal of 80×60 is 50.
        assert!(max_sq >= 50 * 50, "max radius² {max_sq}");
    }

    #[test]
    fn test_reset_reproduces_fresh_sequence() {
        let fresh: Vec<Point> = SpiralPath::new(2.0, 5.0, 120, 90).collect();

        let mut reused = SpiralPath::new(2.0, 5.0, 120, 90);
        // Partially consume, then exhaust, then rewind.
        reused.by_ref().take(500).for_each(drop);
        reused.reset();
        let first_pass: Vec<Point> = reused.by_ref().collect();
        reused.reset();
        let second_pass: Vec<Point> = reused.collect();

        assert_eq!(fresh, first_pass);
        assert_eq!(fresh, second_pass);
    }

    #[test]
    fn test_center_only_yielded_once_per_sweep() {
        let mut s = SpiralPath::new(3.0, 1.0, 100, 100);
        let center = s.next().unwrap();
        // a = 3 keeps every later point off the exact center.
        assert!(s.all(|p| p != center));
    }

    #[test]
    #[should_panic]
    fn test_zero_growth_rejected() {
        let _ = SpiralPath::new(2.0, 0.0, 10, 10);
    }
}
