//! End-to-end generation with a real font.  Skipped on machines without
//! an on-disk sans-serif font.

use wordcloud_layout::{crop, generate, GenerateError, GeneratorOptions, Rect, SeededRandom, Word};
use wordcloud_text::{discover_system_font, CosmicRasterizer};

fn words() -> Vec<Word> {
    let mut words: Vec<Word> = ["cloud", "placement", "spiral", "glyph", "canvas", "shrink"]
        .iter()
        .enumerate()
        .map(|(i, t)| Word::new(*t, 60.0 - i as f32 * 8.0))
        .collect();
    words.extend((0..30).map(|i| Word::new(format!("Test {i}"), 18.0)));
    words
}

fn run(seed: u64) -> Option<wordcloud_layout::Generation> {
    let font_path = discover_system_font()?;
    let options = GeneratorOptions {
        width: 320,
        height: 240,
        font_path,
        rng: Some(Box::new(SeededRandom::new(seed))),
        ..Default::default()
    };
    let mut words = words();
    Some(generate(options, &mut words, &mut CosmicRasterizer::new()).unwrap())
}

#[test]
fn test_placements_inside_canvas_and_ink_inside_placements() {
    let Some(generation) = run(99) else {
        eprintln!("no system font, skipping");
        return;
    };
    assert!(!generation.placements.is_empty());
    assert_eq!(generation.placements[0].index, 0);
    assert_eq!(generation.placements[0].angle, 0.0);

    let bounds = Rect::new(0, 0, 320, 240);
    for p in &generation.placements {
        assert!(bounds.contains_rect(&p.rect), "{p:?} escapes the canvas");
    }

    for (x, y, px) in generation.image.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = (x as i32, y as i32);
        assert!(
            generation
                .placements
                .iter()
                .any(|p| x >= p.rect.x0 && x < p.rect.x1 && y >= p.rect.y0 && y < p.rect.y1),
            "stray ink at ({x}, {y})"
        );
    }
}

#[test]
fn test_first_word_centered() {
    let Some(generation) = run(3) else {
        return;
    };
    let first = &generation.placements[0];
    let cx = (first.rect.x0 + first.rect.x1) / 2;
    let cy = (first.rect.y0 + first.rect.y1) / 2;
    assert!((cx - 160).abs() <= 1, "center x {cx}");
    assert!((cy - 120).abs() <= 1, "center y {cy}");
}

#[test]
fn test_same_seed_same_pixels() {
    let (Some(a), Some(b)) = (run(1234), run(1234)) else {
        return;
    };
    assert_eq!(a.placements, b.placements);
    assert_eq!(a.skipped, b.skipped);
    assert!(a.image.as_raw() == b.image.as_raw());
}

#[test]
fn test_trimmed_output_not_larger_than_canvas() {
    let Some(generation) = run(5) else {
        return;
    };
    let trimmed = crop(&generation.image).unwrap();
    assert!(trimmed.width() <= 320 && trimmed.height() <= 240);
}

#[test]
fn test_bad_font_path_aborts() {
    let options = GeneratorOptions {
        font_path: "/nonexistent/font.ttf".into(),
        rng: Some(Box::new(SeededRandom::new(1))),
        ..Default::default()
    };
    let mut words = words();
    let err = generate(options, &mut words, &mut CosmicRasterizer::new()).unwrap_err();
    assert!(matches!(err, GenerateError::FontResource(_)));
}
