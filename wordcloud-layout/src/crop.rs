//! Tight cropping to the opaque region of a bitmap.
//!
//! A pixel is opaque when its alpha channel is non-zero.  A fully
//! transparent bitmap has no opaque bounds; both functions report that
//! as `None` rather than inventing a rectangle.

use image::{imageops, RgbaImage};

use crate::spatial::Rect;

/// Smallest rectangle enclosing every pixel with non-zero alpha.
pub fn opaque_bounds(bitmap: &RgbaImage) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;

    for (x, y, px) in bitmap.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = (x as i32, y as i32);
        bounds = Some(match bounds {
            None => Rect::new(x, y, x + 1, y + 1),
            Some(b) => Rect::new(b.x0.min(x), b.y0.min(y), b.x1.max(x + 1), b.y1.max(y + 1)),
        });
    }
    bounds
}

/// Copy of `bitmap` trimmed to [`opaque_bounds`].
///
/// Returns `None` when the bitmap has no opaque pixel.
pub fn crop(bitmap: &RgbaImage) -> Option<RgbaImage> {
    let b = opaque_bounds(bitmap)?;
    Some(
        imageops::crop_imm(bitmap, b.x0 as u32, b.y0 as u32, b.width(), b.height()).to_image(),
    )
}
