//! Font resources: reading a font file from disk and locating a system
//! default.
//!
//! `font-kit` validates the bytes up front so a bad path or a truncated
//! file is reported before any rendering starts.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use font_kit::family_name::FamilyName;
use font_kit::font::Font;
use font_kit::handle::Handle;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use wordcloud_layout::FontError;

/// A font file loaded into memory and checked to parse.
#[derive(Clone)]
pub struct FontResource {
    path: PathBuf,
    data: Arc<Vec<u8>>,
    family: String,
}

impl FontResource {
    /// Read and validate the font at `path`.
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, bytes)
    }

    /// Validate in-memory font bytes, attributing errors to `path`.
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, FontError> {
        let data = Arc::new(bytes);
        let font = Font::from_bytes(Arc::clone(&data), 0).map_err(|e| FontError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let family = font.family_name();
        log::info!("loaded font '{}' from {}", family, path.display());

        Ok(Self {
            path: path.to_path_buf(),
            data,
            family,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font file bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Family name reported by the font's naming table.
    pub fn family(&self) -> &str {
        &self.family
    }
}

impl fmt::Debug for FontResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResource")
            .field("path", &self.path)
            .field("family", &self.family)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Path of the system's preferred sans-serif font, if it lives on disk.
///
/// Fonts the platform only exposes from memory are not usable here since
/// the engine takes a path.
pub fn discover_system_font() -> Option<PathBuf> {
    let source = SystemSource::new();
    let handle = source
        .select_best_match(&[FamilyName::SansSerif], &Properties::new())
        .ok()?;

    match handle {
        Handle::Path { path, .. } => {
            log::debug!("system sans-serif font: {}", path.display());
            Some(path)
        }
        Handle::Memory { .. } => {
            log::debug!("system sans-serif font is memory-backed, ignoring");
            None
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
