//! Rendering benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mrqr::render::render;
use mrqr::settings::{Density, Settings};

const SHORT_URL: &str = "https://github.com";

fn long_text() -> String {
    "The quick brown fox jumps over the lazy dog. ".repeat(12)
}

fn benchmark_render_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("QR Rendering");

    for density in Density::all() {
        let settings = Settings {
            density: *density,
            ..Settings::default()
        };

        group.bench_function(format!("url_{}", density.name()), |b| {
            b.iter(|| render(black_box(SHORT_URL), black_box(&settings)))
        });
    }

    let text = long_text();
    group.bench_function("long_text_medium", |b| {
        b.iter(|| render(black_box(&text), black_box(&Settings::default())))
    });

    group.finish();
}

fn benchmark_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("PNG Encoding");

    for density in Density::all() {
        let settings = Settings {
            density: *density,
            ..Settings::default()
        };
        let Ok(Some(surface)) = render(SHORT_URL, &settings) else {
            continue;
        };

        group.bench_function(density.name(), |b| b.iter(|| black_box(&surface).to_png()));
    }

    group.finish();
}

criterion_group!(benches, benchmark_render_density, benchmark_png_encoding);
criterion_main!(benches);
