//! # wordcloud-text
//!
//! Text rendering for the word cloud engine: font resource loading and a
//! `cosmic-text` implementation of [`wordcloud_layout::TextRasterizer`].
//!
//! ## Architecture
//!
//! ```text
//! FontResource::load(path) ── font-kit validation
//!     │
//!     ▼
//! CosmicRasterizer (FontSystem with a single-font database + SwashCache)
//!     │
//!     ├── measure(str) ──► TextMetrics { width, line_height }
//!     └── draw(str)    ──► glyph coverage blended into an RgbaImage
//! ```
//!
//! - **`fonts`**: reading font files, locating a system default.
//! - **`engine`**: shaping and rasterization via `cosmic-text`.

pub mod engine;
pub mod fonts;

// Re-exports for ergonomic use.
pub use engine::CosmicRasterizer;
pub use fonts::{discover_system_font, FontResource};
