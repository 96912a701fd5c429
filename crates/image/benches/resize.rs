//! Benchmarks for the resize and encode stages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use imgbatch_core::config::ResizeFilter;
use imgbatch_image::{encode_image, resize_to_width, target_height, EncodePolicy, OutputFormat};

fn sample_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(1600, 1200, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn bench_target_height(c: &mut Criterion) {
    c.bench_function("target_height", |b| {
        b.iter(|| target_height(black_box(4000), black_box(3000), black_box(800)))
    });
}

fn bench_resize(c: &mut Criterion) {
    let img = sample_image();

    c.bench_function("resize_triangle_800", |b| {
        b.iter(|| resize_to_width(black_box(img.clone()), 800, ResizeFilter::Triangle))
    });
}

fn bench_encode(c: &mut Criterion) {
    let img = sample_image().resize_exact(400, 300, image::imageops::FilterType::Triangle);
    let jpeg = EncodePolicy::new(OutputFormat::Jpeg, 85);
    let png = EncodePolicy::new(OutputFormat::Png, 85);

    c.bench_function("encode_jpeg_q85", |b| b.iter(|| encode_image(black_box(&img), &jpeg)));
    c.bench_function("encode_png_best", |b| b.iter(|| encode_image(black_box(&img), &png)));
}

criterion_group!(benches, bench_target_height, bench_resize, bench_encode);
criterion_main!(benches);
