//! # wordcloud-layout
//!
//! Placement engine for word clouds: packs differently sized word glyphs
//! onto a shared canvas without overlap.
//!
//! ## Architecture
//!
//! ```text
//! generate(options, words, rasterizer)
//!     │
//!     ▼
//! PlacementSession ── per word ──► Render (TextRasterizer) ─► rotate ─► crop
//!     │                                                            │
//!     │                  SpiralPath ──► candidate centers ◄────────┘
//!     │                                   │
//!     ▼                                   ▼
//! Canvas (RgbaImage + SpatialHash) ◄── collides / composite
//! ```
//!
//! - **`spiral`**: Archimedean spiral of candidate centers.
//! - **`canvas`**: alpha occupancy buffer with an indexed collision test.
//! - **`spatial`**: pixel rectangles and the uniform grid index.
//! - **`crop`**: trim a bitmap to its opaque bounds.
//! - **`raster`**: glyph color derivation and rotation.
//! - **`random`**: seedable random source.
//! - **`render`**: the text rasterizer boundary.
//! - **`engine`**: the per-word state machine and `generate`.

pub mod canvas;
pub mod crop;
pub mod engine;
pub mod random;
pub mod raster;
pub mod render;
pub mod spatial;
pub mod spiral;

// Re-exports for ergonomic use.
pub use canvas::Canvas;
pub use crop::{crop, opaque_bounds};
pub use engine::{
    generate, GenerateError, Generation, GeneratorOptions, Placement, PlacementSession, Word,
    WordOutcome,
};
pub use random::{RandomSource, SeededRandom};
pub use render::{FontError, TextMetrics, TextRasterizer};
pub use spatial::Rect;
pub use spiral::{Point, SpiralPath};
