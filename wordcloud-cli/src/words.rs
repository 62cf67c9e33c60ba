//! Word list input: JSON files or synthetic filler words.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use wordcloud_layout::{RandomSource, Word};

/// One entry of a JSON word list: `{"text": "...", "size": 40, "count": 3}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WordEntry {
    pub text: String,
    pub size: f32,
    #[serde(default)]
    pub count: f32,
}

impl From<WordEntry> for Word {
    fn from(entry: WordEntry) -> Self {
        Word {
            text: entry.text,
            size: entry.size,
            count: entry.count,
        }
    }
}

/// Parse a JSON array of [`WordEntry`] records.
pub fn parse_words(json: &str) -> Result<Vec<Word>> {
    let entries: Vec<WordEntry> = serde_json::from_str(json).context("invalid word list")?;
    Ok(entries.into_iter().map(Word::from).collect())
}

/// Read a JSON word list from `path`.
pub fn load_words(path: &Path) -> Result<Vec<Word>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;
    parse_words(&json).with_context(|| format!("in {}", path.display()))
}

/// `count` filler words `"Test N"` with integer sizes in `[min_size, base_size)`.
pub fn synthetic_words(
    count: usize,
    min_size: u32,
    base_size: u32,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Word>> {
    ensure!(
        base_size > min_size,
        "base size {base_size} must exceed min size {min_size}"
    );
    let span = (base_size - min_size) as usize;
    Ok((0..count)
        .map(|i| {
            let size = (rng.next_index(span) as u32 + min_size) as f32;
            Word::new(format!("Test {i}"), size)
        })
        .collect())
}

/// Largest first; the engine places words in slice order.
pub fn sort_largest_first(words: &mut [Word]) {
    words.sort_by(|a, b| b.size.total_cmp(&a.size));
}
