//! Spatial Hash Grid over placed glyph rectangles.
//!
//! Divides the canvas into uniform square cells.  Each composited glyph
//! occupies one or more cells based on its rectangle.  Region queries only
//! inspect the cells the query rectangle touches, so the collision test can
//! skip every part of the canvas that no glyph has been drawn into.
//!
//! All coordinates are integer pixels and every [`Rect`] is half-open:
//! `[x0, x1) × [y0, y1)`.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::spiral::Point;

// ───────────────────────────────────────────────────────────────────
// Rect: half-open pixel rectangle
// ───────────────────────────────────────────────────────────────────

/// Axis-aligned pixel rectangle `[x0, x1) × [y0, y1)` in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    #[inline(always)]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create from top-left corner + size.
    #[inline(always)]
    pub fn from_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width as i32,
            y1: y + height as i32,
        }
    }

    /// Rectangle of the given size centered on `center`.
    ///
    /// For odd sizes the extra pixel lands on the right/bottom side.
    #[inline]
    pub fn centered(center: Point, width: u32, height: u32) -> Self {
        Self::from_size(
            center.x - (width / 2) as i32,
            center.y - (height / 2) as i32,
            width,
            height,
        )
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    #[inline(always)]
    pub fn top_left(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Overlap test.  Edges that merely touch do not intersect.
    #[inline(always)]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Shared region of two rectangles, or `None` when they do not overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let r = Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (!r.is_empty()).then_some(r)
    }

    /// Whether `other` lies entirely inside `self`.
    #[inline(always)]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }
}

// ───────────────────────────────────────────────────────────────────
// Cell key
// ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CellKey(i32, i32);

// ───────────────────────────────────────────────────────────────────
// SpatialHash
// ───────────────────────────────────────────────────────────────────

/// Grid-based spatial hash mapping cells to the ids of rectangles
/// that touch them.
#[derive(Clone, Debug)]
pub struct SpatialHash {
    /// Width/height of each grid cell in pixels.
    cell_size: i32,
    /// Grid: cell → ids of rectangles occupying that cell.
    grid: FxHashMap<CellKey, Vec<u32>>,
    /// Per-id bounds for precise intersection tests.
    bounds: FxHashMap<u32, Rect>,
}

impl SpatialHash {
    /// Create a new spatial hash with the given cell size in pixels.
    pub fn new(cell_size: u32) -> Self {
        assert!(cell_size > 0, "cell_size must be positive");
        Self {
            cell_size: cell_size as i32,
            grid: FxHashMap::default(),
            bounds: FxHashMap::default(),
        }
    }

    // ───────────────────── helpers ─────────────────────

    #[inline(always)]
    fn to_cell(&self, x: i32, y: i32) -> CellKey {
        CellKey(x.div_euclid(self.cell_size), y.div_euclid(self.cell_size))
    }

    /// Inclusive cell range covered by a non-empty rect.
    #[inline]
    fn cell_range(&self, rect: &Rect) -> (CellKey, CellKey) {
        let min = self.to_cell(rect.x0, rect.y0);
        let max = self.to_cell(rect.x1 - 1, rect.y1 - 1);
        (min, max)
    }

    // ───────────────────── mutation ─────────────────────

    /// Insert a rectangle under `id`.  Empty rectangles are ignored.
    ///
    /// Re-inserting an existing id replaces its bounds.
    pub fn insert(&mut self, id: u32, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        if let Some(old) = self.bounds.insert(id, rect) {
            self.unlink(id, &old);
        }
        let (min, max) = self.cell_range(&rect);
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                self.grid.entry(CellKey(cx, cy)).or_default().push(id);
            }
        }
    }

    fn unlink(&mut self, id: u32, rect: &Rect) {
        let (min, max) = self.cell_range(rect);
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                let key = CellKey(cx, cy);
                if let Some(ids) = self.grid.get_mut(&key) {
                    if let Some(pos) = ids.iter().position(|&x| x == id) {
                        ids.swap_remove(pos);
                    }
                    if ids.is_empty() {
                        self.grid.remove(&key);
                    }
                }
            }
        }
    }

    // ───────────────────── queries ─────────────────────

    /// Bounds stored for `id`.
    #[inline]
    pub fn bounds(&self, id: u32) -> Option<&Rect> {
        self.bounds.get(&id)
    }

    /// Return all ids whose rectangle intersects `region`, in ascending id
    /// order.
    pub fn query_region(&self, region: &Rect) -> Vec<u32> {
        let mut result = Vec::new();
        if region.is_empty() {
            return result;
        }
        let mut seen = FxHashSet::default();

        let (min, max) = self.cell_range(region);
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                if let Some(ids) = self.grid.get(&CellKey(cx, cy)) {
                    for &id in ids {
                        if seen.insert(id) {
                            if let Some(rect) = self.bounds.get(&id) {
                                if rect.intersects(region) {
                                    result.push(id);
                                }
                            }
                        }
                    }
                }
            }
        }
        result.sort_unstable();
        result
    }

    // ───────────────────── stats ─────────────────────

    /// Number of rectangles tracked.
    #[inline]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Number of occupied grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }
}

// ===================================================================
// Tests
// ===================================================================
