//! Text rendering boundary.
//!
//! The engine never touches fonts directly.  It talks to a
//! [`TextRasterizer`], which loads a font resource, measures strings at the
//! current size, and draws them into glyph bitmaps.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Failure to obtain a usable font resource.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse font {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Rendered extent of a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width in pixels.
    pub width: f32,
    /// Line height in pixels.
    pub line_height: f32,
}

/// Text-rendering collaborator used by the placement engine.
pub trait TextRasterizer {
    /// Load the font resource at `path`, replacing any previous font.
    fn load_font(&mut self, path: &Path) -> Result<(), FontError>;

    /// Configure the pixel size used by subsequent `measure`/`draw` calls.
    fn set_font_size(&mut self, size: f32);

    /// Measure `text` as a single line at the current size.
    fn measure(&mut self, text: &str) -> TextMetrics;

    /// Draw `text` into `target` with its left edge at x = 0 and its
    /// baseline at `baseline_y`.  Pixels outside `target` are clipped.
    fn draw(&mut self, text: &str, color: Rgba<u8>, baseline_y: i32, target: &mut RgbaImage);
}

impl<T: TextRasterizer + ?Sized> TextRasterizer for &mut T {
    fn load_font(&mut self, path: &Path) -> Result<(), FontError> {
        (**self).load_font(path)
    }

    fn set_font_size(&mut self, size: f32) {
        (**self).set_font_size(size)
    }

    fn measure(&mut self, text: &str) -> TextMetrics {
        (**self).measure(text)
    }

    fn draw(&mut self, text: &str, color: Rgba<u8>, baseline_y: i32, target: &mut RgbaImage) {
        (**self).draw(text, color, baseline_y, target)
    }
}
