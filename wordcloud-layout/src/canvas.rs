//! Shared occupancy canvas.
//!
//! The canvas is an RGBA bitmap whose alpha channel is the occupancy
//! signal: a pixel is taken when its alpha is non-zero.  Every composited
//! glyph rectangle is also recorded in a [`SpatialHash`] so collision
//! queries only scan the parts of a candidate rectangle that some glyph
//! could have touched.  Results are identical to a full per-pixel scan.

use image::RgbaImage;

use crate::spatial::{Rect, SpatialHash};
use crate::spiral::Point;

/// Grid cell size for the occupancy index.
pub const INDEX_CELL_SIZE: u32 = 32;

/// Fixed-size occupancy canvas.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
    index: SpatialHash,
    next_id: u32,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            index: SpatialHash::new(INDEX_CELL_SIZE),
            next_id: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The whole canvas as a rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(0, 0, self.width(), self.height())
    }

    /// Whether `rect` lies fully inside the canvas.
    #[inline]
    pub fn contains(&self, rect: &Rect) -> bool {
        self.bounds().contains_rect(rect)
    }

    /// Whether the pixel at `(x, y)` is occupied.  Outside pixels never are.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return false;
        }
        self.image.get_pixel(x as u32, y as u32)[3] != 0
    }

    /// True iff any pixel inside `rect` has non-zero alpha.
    pub fn collides(&self, rect: &Rect) -> bool {
        let Some(region) = rect.intersection(&self.bounds()) else {
            return false;
        };

        for id in self.index.query_region(&region) {
            let Some(overlap) = self.index.bounds(id).and_then(|b| b.intersection(&region)) else {
                continue;
            };
            if self.scan(&overlap) {
                return true;
            }
        }
        false
    }

    /// Per-pixel alpha scan over a rectangle already clipped to the canvas.
    fn scan(&self, rect: &Rect) -> bool {
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                if self.image.get_pixel(x as u32, y as u32)[3] != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Overlay `glyph` with its top-left corner at `top_left`.
    ///
    /// Destination pixels are replaced wherever the glyph's alpha is
    /// non-zero; transparent glyph pixels leave the canvas untouched.
    /// Parts of the glyph beyond the canvas are clipped.
    pub fn composite(&mut self, glyph: &RgbaImage, top_left: Point) {
        let placed = Rect::from_size(top_left.x, top_left.y, glyph.width(), glyph.height());
        let Some(clipped) = placed.intersection(&self.bounds()) else {
            return;
        };

        for y in clipped.y0..clipped.y1 {
            for x in clipped.x0..clipped.x1 {
                let src = glyph.get_pixel((x - top_left.x) as u32, (y - top_left.y) as u32);
                if src[3] != 0 {
                    self.image.put_pixel(x as u32, y as u32, *src);
                }
            }
        }

        self.index.insert(self.next_id, clipped);
        self.next_id += 1;
    }

    /// Number of glyphs composited so far.
    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.index.len()
    }

    /// Borrow the composed bitmap.
    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas, returning the composed bitmap.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
