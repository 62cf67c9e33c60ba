//! Placement engine: turns an ordered word list into a packed canvas.
//!
//! Each word runs through a small state machine:
//!
//! ```text
//! Render ──► Search ──► Accept
//!   ▲          │
//!   │          ├──► Shrink ──┐   (no slot, min_size set, size ≥ min_size)
//!   └──────────┼─────────────┘
//!              └──► Skip         (no slot otherwise, or nothing visible)
//! ```
//!
//! Rendering delegates to a [`TextRasterizer`].  Search walks a
//! [`SpiralPath`] from the canvas center and takes the first point whose
//! centered glyph rectangle is inside the canvas and free on the
//! [`Canvas`].  A failed search either shrinks the word by
//! [`SHRINK_FACTOR`] and renders it again, or drops it.  Dropping a word is
//! not an error; generation only fails before any rendering starts.

use std::path::PathBuf;

use image::RgbaImage;
use log::{debug, info, trace};
use thiserror::Error;

use crate::canvas::Canvas;
use crate::crop::crop;
use crate::random::RandomSource;
use crate::raster::{glyph_color, rotate};
use crate::render::{FontError, TextRasterizer};
use crate::spatial::Rect;
use crate::spiral::SpiralPath;

/// Size multiplier applied on every shrink-retry.
pub const SHRINK_FACTOR: f32 = 0.75;

/// Glyph bitmaps are this many line heights tall so rotation never clips
/// ascenders or descenders.
pub const LINE_HEIGHT_ALLOWANCE: u32 = 2;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Generator options are missing a random source")]
    MissingRandomSource,
    #[error("Font resource error: {0}")]
    FontResource(#[from] FontError),
}

/// A word to place.  `size` is reduced in place on shrink-retries.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub text: String,
    /// Font size in pixels.
    pub size: f32,
    /// Frequency carried through from the caller; unused by placement.
    pub count: f32,
}

impl Word {
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            count: 0.0,
        }
    }
}

/// Configuration for a single generation run.
pub struct GeneratorOptions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Smallest size a word may be shrunk from.  0 disables shrinking.
    pub min_size: f32,
    /// Rotation choices in degrees (counter-clockwise).  Empty → never rotate.
    pub angles: Vec<f32>,
    /// Font resource handed to the rasterizer.
    pub font_path: PathBuf,
    /// Seeded random source.  Required.
    pub rng: Option<Box<dyn RandomSource>>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            min_size: 15.0,
            angles: vec![0.0, 45.0, -45.0, 90.0],
            font_path: PathBuf::new(),
            rng: None,
        }
    }
}

/// An accepted word.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Position of the word in the input slice.
    pub index: usize,
    pub text: String,
    /// Size the word was finally rendered at.
    pub size: f32,
    /// Rotation applied, in degrees.
    pub angle: f32,
    /// Canvas rectangle covered by the cropped glyph.
    pub rect: Rect,
}

/// Result of feeding one word through the state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum WordOutcome {
    Placed(Placement),
    Skipped { shrinks: u32 },
}

/// Output of a full run.
#[derive(Clone, Debug)]
pub struct Generation {
    /// Composed canvas.
    pub image: RgbaImage,
    /// Accepted words in placement order.
    pub placements: Vec<Placement>,
    /// Input indices of words that could not be placed.
    pub skipped: Vec<usize>,
}

/// Whether a word that found no slot should be retried smaller.
#[inline]
pub fn should_shrink(min_size: f32, size: f32) -> bool {
    min_size != 0.0 && size >= min_size
}

/// Rendered, rotated, cropped glyph ready for search.
struct Glyph {
    bitmap: RgbaImage,
    angle: f32,
}

enum WordState {
    Render,
    Search(Glyph),
    Accept(Glyph, Rect),
    Shrink,
    Skip,
}

/// Owned state of one generation run.
pub struct PlacementSession<'r, R: TextRasterizer + ?Sized> {
    canvas: Canvas,
    spiral: SpiralPath,
    rng: Box<dyn RandomSource>,
    rasterizer: &'r mut R,
    /// Size the rasterizer is currently configured for.
    font_size: Option<f32>,
    min_size: f32,
    angles: Vec<f32>,
    placements: Vec<Placement>,
    skipped: Vec<usize>,
}

impl<'r, R: TextRasterizer + ?Sized> PlacementSession<'r, R> {
    /// Validate options, load the font, and allocate a blank canvas.
    pub fn new(options: GeneratorOptions, rasterizer: &'r mut R) -> Result<Self, GenerateError> {
        let rng = options.rng.ok_or(GenerateError::MissingRandomSource)?;
        rasterizer.load_font(&options.font_path)?;

        Ok(Self {
            canvas: Canvas::new(options.width, options.height),
            spiral: SpiralPath::for_canvas(options.width, options.height),
            rng,
            rasterizer,
            font_size: None,
            min_size: options.min_size,
            angles: options.angles,
            placements: Vec::new(),
            skipped: Vec::new(),
        })
    }

    /// Canvas in its current state.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Run the state machine for `word`, found at `index` in the input.
    pub fn place_word(&mut self, index: usize, word: &mut Word) -> WordOutcome {
        let mut shrinks = 0u32;
        let mut state = WordState::Render;

        loop {
            state = match state {
                WordState::Render => match self.render(index, word) {
                    Some(glyph) => WordState::Search(glyph),
                    None => {
                        debug!("'{}' at size {} has no visible pixels", word.text, word.size);
                        WordState::Skip
                    }
                },
                WordState::Search(glyph) => {
                    match self.find_slot(glyph.bitmap.width(), glyph.bitmap.height()) {
                        Some(rect) => WordState::Accept(glyph, rect),
                        None if should_shrink(self.min_size, word.size) => WordState::Shrink,
                        None => WordState::Skip,
                    }
                }
                WordState::Accept(glyph, rect) => {
                    self.canvas.composite(&glyph.bitmap, rect.top_left());
                    let placement = Placement {
                        index,
                        text: word.text.clone(),
                        size: word.size,
                        angle: glyph.angle,
                        rect,
                    };
                    debug!(
                        "placed '{}' size {} angle {} at {:?}",
                        word.text, word.size, glyph.angle, rect
                    );
                    self.placements.push(placement.clone());
                    return WordOutcome::Placed(placement);
                }
                WordState::Shrink => {
                    word.size *= SHRINK_FACTOR;
                    shrinks += 1;
                    trace!("'{}' found no slot, retrying at size {}", word.text, word.size);
                    WordState::Render
                }
                WordState::Skip => {
                    debug!("skipped '{}' after {} shrink(s)", word.text, shrinks);
                    self.skipped.push(index);
                    return WordOutcome::Skipped { shrinks };
                }
            };
        }
    }

    /// Render, rotate and crop `word` at its current size.
    fn render(&mut self, index: usize, word: &Word) -> Option<Glyph> {
        if self.font_size != Some(word.size) {
            self.rasterizer.set_font_size(word.size);
            self.font_size = Some(word.size);
        }

        let color = glyph_color(self.rng.next_int());
        let metrics = self.rasterizer.measure(&word.text);
        let width = metrics.width.max(0.0).ceil() as u32;
        let height = metrics.line_height.max(0.0).ceil() as u32 * LINE_HEIGHT_ALLOWANCE;

        let mut bitmap = RgbaImage::new(width, height);
        self.rasterizer
            .draw(&word.text, color, (height / 2) as i32, &mut bitmap);

        // The first word always goes down unrotated.
        let angle = if index == 0 || self.angles.is_empty() {
            0.0
        } else {
            self.angles[self.rng.next_index(self.angles.len())]
        };
        if angle != 0.0 {
            bitmap = rotate(&bitmap, angle);
        }

        crop(&bitmap).map(|bitmap| Glyph { bitmap, angle })
    }

    /// First spiral point whose centered `width × height` rectangle fits.
    fn find_slot(&mut self, width: u32, height: u32) -> Option<Rect> {
        self.spiral.reset();
        for center in self.spiral.by_ref() {
            let rect = Rect::centered(center, width, height);
            if !self.canvas.contains(&rect) || self.canvas.collides(&rect) {
                continue;
            }
            return Some(rect);
        }
        None
    }

    /// Consume the session and hand back the composed result.
    pub fn finish(self) -> Generation {
        Generation {
            image: self.canvas.into_image(),
            placements: self.placements,
            skipped: self.skipped,
        }
    }
}

/// Place `words` in order onto a fresh canvas.
///
/// Word sizes are updated in place to the size they were placed (or
/// finally given up) at.
pub fn generate<R: TextRasterizer + ?Sized>(
    options: GeneratorOptions,
    words: &mut [Word],
    rasterizer: &mut R,
) -> Result<Generation, GenerateError> {
    let (width, height) = (options.width, options.height);
    let mut session = PlacementSession::new(options, rasterizer)?;

    for (index, word) in words.iter_mut().enumerate() {
        session.place_word(index, word);
    }

    let generation = session.finish();
    info!(
        "placed {} of {} words on {}×{} canvas",
        generation.placements.len(),
        words.len(),
        width,
        height
    );
    Ok(generation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_shrink() {
        assert!(!should_shrink(0.0, 100.0));
        assert!(should_shrink(15.0, 15.0));
        assert!(should_shrink(15.0, 40.0));
        assert!(!should_shrink(15.0, 14.99));
    }

    #[test]
    fn test_word_new() {
        let w = Word::new("hello", 32.0);
        assert_eq!(w.text, "hello");
        assert_eq!(w.size, 32.0);
        assert_eq!(w.count, 0.0);
    }

    #[test]
    fn test_options_default() {
        let opts = GeneratorOptions::default();
        assert_eq!((opts.width, opts.height), (400, 400));
        assert_eq!(opts.min_size, 15.0);
        assert_eq!(opts.angles, vec![0.0, 45.0, -45.0, 90.0]);
        assert!(opts.rng.is_none());
    }
}
