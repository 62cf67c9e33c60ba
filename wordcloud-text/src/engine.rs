//! `cosmic-text` implementation of [`TextRasterizer`].
//!
//! The rasterizer owns a private `FontSystem` whose database holds only the
//! loaded font, so shaping never falls back to some other system face and
//! output depends on the font file alone.  Glyph coverage comes from a
//! `SwashCache` and is blended source-over into the caller's bitmap.

use std::path::Path;

use cosmic_text::fontdb;
use cosmic_text::{Attrs, Buffer, Color as CColor, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::{Rgba, RgbaImage};
use wordcloud_layout::{FontError, TextMetrics, TextRasterizer};

use crate::fonts::FontResource;

/// Line height as a multiple of the font size (rounded up to whole pixels).
pub const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Locale handed to `cosmic-text` for shaping.
const SHAPING_LOCALE: &str = "en-US";

/// Font-dependent state, present once a font has been loaded.
struct LoadedFont {
    resource: FontResource,
    family: String,
    font_system: FontSystem,
    swash_cache: SwashCache,
}

/// Text rasterizer backed by `cosmic-text` and `swash`.
pub struct CosmicRasterizer {
    font: Option<LoadedFont>,
    metrics: Metrics,
}

impl Default for CosmicRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmicRasterizer {
    /// Create a rasterizer with no font loaded.
    pub fn new() -> Self {
        Self {
            font: None,
            metrics: metrics_for(16.0),
        }
    }

    /// The loaded font resource, if any.
    pub fn font(&self) -> Option<&FontResource> {
        self.font.as_ref().map(|f| &f.resource)
    }

    /// Current font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.metrics.font_size
    }

    /// Shape `text` as one unwrapped line at the current size.
    fn shape(&mut self, text: &str) -> Option<Buffer> {
        let Some(font) = self.font.as_mut() else {
            log::warn!("rendering '{}' without a loaded font", text);
            return None;
        };
        if self.metrics.font_size <= 0.0 || self.metrics.line_height <= 0.0 {
            return None;
        }

        let attrs = Attrs::new().family(Family::Name(&font.family));
        let mut buffer = Buffer::new(&mut font.font_system, self.metrics);
        buffer.set_size(&mut font.font_system, None, None);
        buffer.set_text(&mut font.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut font.font_system, false);
        Some(buffer)
    }
}

/// Metrics for `size`, with a whole-pixel line height.
fn metrics_for(size: f32) -> Metrics {
    Metrics::new(size, (size * LINE_HEIGHT_RATIO).ceil())
}

impl TextRasterizer for CosmicRasterizer {
    fn load_font(&mut self, path: &Path) -> Result<(), FontError> {
        let resource = FontResource::load(path)?;

        let mut db = fontdb::Database::new();
        db.load_font_data(resource.data().to_vec());
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .ok_or_else(|| FontError::Parse {
                path: path.to_path_buf(),
                reason: "no usable font face".into(),
            })?;

        log::debug!("rasterizer using family '{}'", family);
        self.font = Some(LoadedFont {
            resource,
            family,
            font_system: FontSystem::new_with_locale_and_db(SHAPING_LOCALE.into(), db),
            swash_cache: SwashCache::new(),
        });
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) {
        self.metrics = metrics_for(size);
    }

    fn measure(&mut self, text: &str) -> TextMetrics {
        let line_height = self.metrics.line_height;
        let Some(buffer) = self.shape(text) else {
            return TextMetrics::default();
        };

        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max);
        TextMetrics { width, line_height }
    }

    fn draw(&mut self, text: &str, color: Rgba<u8>, baseline_y: i32, target: &mut RgbaImage) {
        let Some(buffer) = self.shape(text) else {
            return;
        };
        let Some(font) = self.font.as_mut() else {
            return;
        };

        // The buffer lays its first line out with the baseline at line_y.
        let line_y = buffer.layout_runs().next().map_or(0.0, |run| run.line_y);
        let dy = baseline_y - line_y.round() as i32;

        let [r, g, b, a] = color.0;
        buffer.draw(
            &mut font.font_system,
            &mut font.swash_cache,
            CColor::rgba(r, g, b, a),
            |x, y, w, h, c| {
                fill_over(target, x, y + dy, w, h, Rgba([c.r(), c.g(), c.b(), c.a()]));
            },
        );
    }
}

/// Source-over fill of a `w × h` block, clipped to `target`.
fn fill_over(target: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, src: Rgba<u8>) {
    if src[3] == 0 {
        return;
    }
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w as i32).min(target.width() as i32);
    let y1 = (y + h as i32).min(target.height() as i32);

    for py in y0..y1 {
        for px in x0..x1 {
            let dst = target.get_pixel_mut(px as u32, py as u32);
            *dst = blend_over(src, *dst);
        }
    }
}

/// Straight-alpha source-over.
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round() as u8,
    ])
}

// ===================================================================
// Tests
// ===================================================================
