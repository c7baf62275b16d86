//! Benchmarks for layout and painting performance.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use textframe::config::{build_render_config, RenderConfig, RenderSettings};
use textframe::delta::document_from_json;
use textframe::measure::ApproxMeasurer;
use textframe::render::{ImageRef, RecordingSurface, Renderer};
use textframe::style::StyleResolver;
use textframe::types::Document;

const SENTENCE: &str = "The quick brown fox jumps over the lazy dog while the cat watches. ";

/// Delta with `paragraphs` paragraphs of mixed formatting.
fn sample_delta(paragraphs: usize) -> String {
    let mut ops = Vec::with_capacity(paragraphs * 3);
    for i in 0..paragraphs {
        ops.push(serde_json::json!({"insert": SENTENCE.repeat(3)}));
        ops.push(serde_json::json!({
            "insert": "highlighted",
            "attributes": {"bold": true, "background": "#FDE68A", "underline": i % 2 == 0}
        }));
        let align = ["left", "center", "right"][i % 3];
        ops.push(serde_json::json!({"insert": "\n", "attributes": {"align": align}}));
    }
    serde_json::json!({ "ops": ops }).to_string()
}

fn sample_document(paragraphs: usize) -> Document {
    document_from_json(&sample_delta(paragraphs)).expect("Failed to build document")
}

/// Benchmark layout alone
fn bench_layout(c: &mut Criterion) {
    let document = sample_document(50);
    let config: RenderConfig<ImageRef> = RenderConfig::default();
    let renderer = Renderer::new(StyleResolver::default());
    let measurer = ApproxMeasurer::default();

    c.bench_function("layout_50_paragraphs", |b| {
        b.iter(|| renderer.layout(black_box(&document), &config, &measurer))
    });
}

/// Benchmark the full render into a recording surface
fn bench_render(c: &mut Criterion) {
    let document = sample_document(50);
    let config: RenderConfig<ImageRef> = RenderConfig::default();
    let mut renderer = Renderer::default();
    let measurer = ApproxMeasurer::default();

    c.bench_function("render_50_paragraphs", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::default();
            renderer.render(&mut surface, black_box(&document), &config, &measurer)
        })
    });
}

/// Benchmark an image border with repeated side tiles
fn bench_image_border(c: &mut Criterion) {
    let settings = RenderSettings::from_json(
        r#"{"border": {"colorMode": "images", "width": 12, "imageBorder": {
            "corners": {"topLeft": {"imageId": "c"}, "topRight": {"imageId": "c", "flipX": true},
                        "bottomRight": {"imageId": "c", "rotation": 180},
                        "bottomLeft": {"imageId": "c", "flipY": true}},
            "sides": {"top": {"imageId": "s"}, "bottom": {"imageId": "s"},
                      "left": {"imageId": "s", "rotation": 90}, "right": {"imageId": "s", "rotation": 90}},
            "sideMode": "repeat"}}}"#,
    )
    .expect("Failed to parse settings");
    let mut images = HashMap::new();
    images.insert("c".to_string(), ImageRef::new("c", 24.0, 24.0));
    images.insert("s".to_string(), ImageRef::new("s", 8.0, 24.0));
    let config = build_render_config(&settings, &images);
    let document = sample_document(5);
    let mut renderer = Renderer::default();
    let measurer = ApproxMeasurer::default();

    c.bench_function("render_image_border", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::default();
            renderer.render(&mut surface, black_box(&document), &config, &measurer)
        })
    });
}

/// Compare render cost across document sizes
fn bench_document_sizes(c: &mut Criterion) {
    let measurer = ApproxMeasurer::default();
    let config: RenderConfig<ImageRef> = RenderConfig::default();
    let mut group = c.benchmark_group("document_size_comparison");

    for paragraphs in [1_usize, 10, 100] {
        let document = sample_document(paragraphs);
        let chars = document.plain_text().chars().count();

        group.throughput(Throughput::Elements(chars as u64));
        group.bench_with_input(
            BenchmarkId::new("render", paragraphs),
            &document,
            |b, document| {
                let mut renderer = Renderer::default();
                b.iter(|| {
                    let mut surface = RecordingSurface::default();
                    renderer.render(&mut surface, black_box(document), &config, &measurer)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_layout,
    bench_render,
    bench_image_border,
    bench_document_sizes,
);

criterion_main!(benches);
