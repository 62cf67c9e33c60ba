use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};
use wordcloud_layout::raster::rotate;
use wordcloud_layout::{
    crop, generate, Canvas, FontError, GeneratorOptions, Point, Rect, SeededRandom, SpiralPath,
    TextMetrics, TextRasterizer, Word,
};

/// Solid-cell rasterizer so benches do not depend on installed fonts.
struct BlockRasterizer {
    size: f32,
}

impl TextRasterizer for BlockRasterizer {
    fn load_font(&mut self, _path: &Path) -> Result<(), FontError> {
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) {
        self.size = size;
    }

    fn measure(&mut self, text: &str) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * (self.size * 0.6).ceil(),
            line_height: (self.size * 1.2).ceil(),
        }
    }

    fn draw(&mut self, text: &str, color: Rgba<u8>, baseline_y: i32, target: &mut RgbaImage) {
        let width = ((text.chars().count() as f32 * (self.size * 0.6).ceil()) as u32).min(target.width());
        let top = (baseline_y - (self.size * 0.7).round() as i32).max(0);
        for y in top..baseline_y.min(target.height() as i32) {
            for x in 0..width {
                target.put_pixel(x, y as u32, color);
            }
        }
    }
}

fn word_list(n: usize) -> Vec<Word> {
    (0..n)
        .map(|i| Word::new(format!("Test {i}"), 100.0 - (i as f32 * 85.0 / n as f32)))
        .collect()
}

/// Benchmark: full sweep of a spiral over a 400×400 canvas
fn bench_spiral_sweep(c: &mut Criterion) {
    c.bench_function("spiral_sweep_400", |b| {
        let mut spiral = SpiralPath::for_canvas(400, 400);
        b.iter(|| {
            spiral.reset();
            black_box(spiral.by_ref().count())
        });
    });
}

/// Benchmark: collision query against a densely populated canvas
fn bench_canvas_collides(c: &mut Criterion) {
    let mut canvas = Canvas::new(400, 400);
    let glyph = RgbaImage::from_pixel(30, 12, Rgba([0, 0, 0, 255]));
    for y in (0..400).step_by(20) {
        for x in (0..400).step_by(40) {
            canvas.composite(&glyph, Point::new(x, y));
        }
    }

    c.bench_function("canvas_collides_free_slot", |b| {
        // Gap between rows of glyphs.
        let rect = Rect::from_size(5, 13, 60, 6);
        b.iter(|| canvas.collides(black_box(&rect)));
    });
    c.bench_function("canvas_collides_hit", |b| {
        let rect = Rect::from_size(100, 100, 80, 40);
        b.iter(|| canvas.collides(black_box(&rect)));
    });
}

/// Benchmark: crop a sparse glyph bitmap
fn bench_crop(c: &mut Criterion) {
    let mut bitmap = RgbaImage::new(300, 240);
    for x in 40..260 {
        for y in 90..130 {
            bitmap.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    c.bench_function("crop_300x240", |b| b.iter(|| crop(black_box(&bitmap))));
}

/// Benchmark: bilinear rotation of a glyph bitmap
fn bench_rotate(c: &mut Criterion) {
    let bitmap = RgbaImage::from_pixel(200, 60, Rgba([20, 40, 60, 255]));
    c.bench_function("rotate_45_200x60", |b| b.iter(|| rotate(black_box(&bitmap), 45.0)));
}

/// Benchmark: generate a cloud of N words
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);

    for count in [25, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            b.iter(|| {
                let mut raster = BlockRasterizer { size: 0.0 };
                let mut words = word_list(n);
                let options = GeneratorOptions {
                    rng: Some(Box::new(SeededRandom::new(1))),
                    ..Default::default()
                };
                generate(options, &mut words, &mut raster).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_spiral_sweep,
    bench_canvas_collides,
    bench_crop,
    bench_rotate,
    bench_generate,
);
criterion_main!(benches);
