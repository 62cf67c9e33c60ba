//! Bitmap helpers for glyph preparation: color derivation and rotation.

use image::{imageops, Rgba, RgbaImage};

/// Glyph color taken from a single random integer.
///
/// The three channels come from overlapping bit windows of the same value
/// (bits 0–7, 3–10 and 6–13), so they are correlated.  Changing this would
/// shift every rendered color for a given seed.
#[inline]
pub fn glyph_color(value: u64) -> Rgba<u8> {
    Rgba([
        (value & 0xff) as u8,
        ((value >> 3) & 0xff) as u8,
        ((value >> 6) & 0xff) as u8,
        255,
    ])
}

/// Rotate `src` counter-clockwise by `degrees` about its center.
///
/// The result is enlarged to hold the whole rotated bitmap and every pixel
/// not covered by the source is fully transparent.  Quarter turns are exact;
/// other angles are resampled bilinearly on premultiplied alpha.
pub fn rotate(src: &RgbaImage, degrees: f32) -> RgbaImage {
    let angle = (degrees as f64).rem_euclid(360.0);

    match angle {
        a if a == 0.0 => return src.clone(),
        a if a == 90.0 => return imageops::rotate270(src),
        a if a == 180.0 => return imageops::rotate180(src),
        a if a == 270.0 => return imageops::rotate90(src),
        _ => {}
    }

    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 {
        return RgbaImage::new(0, 0);
    }

    let (sin, cos) = angle.to_radians().sin_cos();
    let (dst_w, dst_h) = rotated_size(src_w, src_h, sin, cos);
    let mut dst = RgbaImage::new(dst_w, dst_h);

    let src_off = (src_w as f64 / 2.0 - 0.5, src_h as f64 / 2.0 - 0.5);
    let dst_off = (dst_w as f64 / 2.0 - 0.5, dst_h as f64 / 2.0 - 0.5);

    for (x, y, px) in dst.enumerate_pixels_mut() {
        let (sx, sy) = rotate_point(x as f64 - dst_off.0, y as f64 - dst_off.1, sin, cos);
        *px = sample_bilinear(src, sx + src_off.0, sy + src_off.1);
    }
    dst
}

#[inline]
fn rotate_point(x: f64, y: f64, sin: f64, cos: f64) -> (f64, f64) {
    (x * cos - y * sin, x * sin + y * cos)
}

/// Bounding size of a `w × h` bitmap after rotation.
fn rotated_size(w: u32, h: u32, sin: f64, cos: f64) -> (u32, u32) {
    let (wf, hf) = ((w - 1) as f64, (h - 1) as f64);
    let corners = [
        (0.0, 0.0),
        rotate_point(wf, 0.0, sin, cos),
        rotate_point(wf, hf, sin, cos),
        rotate_point(0.0, hf, sin, cos),
    ];
    let (min_x, max_x, min_y, max_y) = corners.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(nx, xx, ny, xy), &(x, y)| (nx.min(x), xx.max(x), ny.min(y), xy.max(y)),
    );

    let grow = |extent: f64| {
        let size = extent + 1.0;
        if size - size.floor() > 0.1 {
            size.floor() as u32 + 1
        } else {
            size.floor() as u32
        }
    };
    (grow(max_x - min_x), grow(max_y - min_y))
}

/// Bilinear sample at a fractional source position.  Neighbours outside
/// the source count as transparent.
fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (src.width() as i64, src.height() as i64);
    let x0 = x.floor();
    let y0 = y.floor();
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut acc = [0.0f64; 4];
    for (sx, sy, weight) in taps {
        if weight <= 0.0 || sx < 0 || sy < 0 || sx >= w || sy >= h {
            continue;
        }
        let p = src.get_pixel(sx as u32, sy as u32);
        let a = p[3] as f64 * weight;
        acc[0] += p[0] as f64 * a;
        acc[1] += p[1] as f64 * a;
        acc[2] += p[2] as f64 * a;
        acc[3] += a;
    }

    if acc[3] <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |v: f64| (v / acc[3]).round().clamp(0.0, 255.0) as u8;
    Rgba([
        channel(acc[0]),
        channel(acc[1]),
        channel(acc[2]),
        acc[3].round().clamp(0.0, 255.0) as u8,
    ])
}
