//! `wordcloud`: render a word cloud PNG from a JSON word list or from
//! synthetic filler words.

mod words;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageFormat;
use log::info;

use wordcloud_layout::{crop, generate, GeneratorOptions, SeededRandom};
use wordcloud_text::{discover_system_font, CosmicRasterizer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Smallest size a word may be shrunk from; 0 disables shrinking.
    #[arg(long, default_value_t = 15)]
    min_size: u32,

    /// Rotation choices in degrees, counter-clockwise.
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [0.0, 45.0, -45.0, 90.0]
    )]
    angles: Vec<f32>,

    /// Never rotate words (overrides --angles).
    #[arg(long)]
    no_rotate: bool,

    /// Random seed.  Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file.  Defaults to the system sans-serif font.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON word list: `[{"text": "...", "size": 40, "count": 3}, ...]`.
    #[arg(long)]
    words: Option<PathBuf>,

    /// Number of synthetic words when no word list is given.
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// Exclusive upper bound for synthetic word sizes.
    #[arg(long, default_value_t = 100)]
    base_size: u32,

    /// Output PNG path.
    #[arg(short, long, default_value = "wordcloud.png")]
    output: PathBuf,

    /// Keep the full canvas instead of trimming blank borders.
    #[arg(long)]
    no_trim: bool,
}

impl Args {
    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    fn angles(&self) -> Vec<f32> {
        if self.no_rotate {
            Vec::new()
        } else {
            self.angles.clone()
        }
    }
}

fn run(args: Args) -> Result<()> {
    let seed = args.seed();
    info!("seed {}", seed);

    let font_path = match &args.font {
        Some(path) => path.clone(),
        None => discover_system_font()
            .context("no system font found; pass one with --font")?,
    };

    let mut words = match &args.words {
        Some(path) => words::load_words(path)?,
        None => {
            // Sizes get their own stream so the layout sequence matches a
            // word-list run with the same seed.
            let mut size_rng = SeededRandom::new(seed.wrapping_add(1));
            words::synthetic_words(args.count, args.min_size, args.base_size, &mut size_rng)?
        }
    };
    words::sort_largest_first(&mut words);

    let options = GeneratorOptions {
        width: args.width,
        height: args.height,
        min_size: args.min_size as f32,
        angles: args.angles(),
        font_path,
        rng: Some(Box::new(SeededRandom::new(seed))),
    };

    let mut rasterizer = CosmicRasterizer::new();
    let generation = generate(options, &mut words, &mut rasterizer)?;
    if !generation.skipped.is_empty() {
        info!("{} word(s) did not fit", generation.skipped.len());
    }

    let image = if args.no_trim {
        generation.image
    } else {
        crop(&generation.image).unwrap_or(generation.image)
    };

    image
        .save_with_format(&args.output, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        "wrote {}×{} image to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wordcloud"]).unwrap();
        assert_eq!((args.width, args.height), (400, 400));
        assert_eq!(args.min_size, 15);
        assert_eq!(args.angles(), vec![0.0, 45.0, -45.0, 90.0]);
        assert_eq!(args.count, 100);
        assert_eq!(args.base_size, 100);
        assert_eq!(args.output, PathBuf::from("wordcloud.png"));
        assert!(!args.no_trim);
    }

    #[test]
    fn test_angles_with_negatives() {
        let args = Args::try_parse_from(["wordcloud", "--angles", "-30,0,30"]).unwrap();
        assert_eq!(args.angles(), vec![-30.0, 0.0, 30.0]);
    }

    #[test]
    fn test_no_rotate_clears_angles() {
        let args = Args::try_parse_from(["wordcloud", "--no-rotate"]).unwrap();
        assert!(args.angles().is_empty());
    }

    #[test]
    fn test_explicit_seed() {
        let args = Args::try_parse_from(["wordcloud", "--seed", "42"]).unwrap();
        assert_eq!(args.seed(), 42);
    }

    #[test]
    fn test_run_missing_font_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let args = Args::try_parse_from([
            "wordcloud",
            "--font",
            "/nonexistent/font.ttf",
            "--seed",
            "1",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        assert!(run(args).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_run_writes_png() {
        let Some(font) = discover_system_font() else {
            eprintln!("no system font, skipping");
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cloud.png");
        let args = Args::try_parse_from([
            "wordcloud",
            "--font",
            font.to_str().unwrap(),
            "--seed",
            "9",
            "--count",
            "20",
            "--width",
            "200",
            "--height",
            "150",
            "--no-trim",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        run(args).unwrap();

        let img = image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (200, 150));
    }
}
