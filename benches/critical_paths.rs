//! Criterion benchmarks for SpriteStash critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Bounding rect: visible-pixel scan of a single cell
//! - Slicer: full grid slicing of sparse and dense sheets
//! - Overview: re-assembling states into one image

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{GenericImageView, Rgba, RgbaImage};
use spritestash::bitmap::{bounding_rect, Bitmap, Visibility};
use spritestash::overview::render_overview;
use spritestash::slicer::slice;
use spritestash::Background;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a sheet of `cols` x `rows` cells where every `stride`-th cell has
/// content and the rest are fully transparent
fn make_sheet(cols: u32, rows: u32, cell: u32, stride: u32) -> Bitmap {
    let mut sheet = RgbaImage::from_pixel(cols * cell, rows * cell, Rgba([0, 0, 0, 0]));
    for r in 0..rows {
        for c in 0..cols {
            if (r * cols + c) % stride != 0 {
                continue;
            }
            for y in cell / 4..cell * 3 / 4 {
                for x in cell / 4..cell * 3 / 4 {
                    sheet.put_pixel(c * cell + x, r * cell + y, Rgba([200, 80, 40, 255]));
                }
            }
        }
    }
    Bitmap::from_rgba(sheet, true)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_bounding_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounding_rect");

    for cell in [16u32, 32, 64, 128] {
        let filled = make_sheet(1, 1, cell, 1);
        let empty = RgbaImage::from_pixel(cell, cell, Rgba([0, 0, 0, 0]));
        group.throughput(Throughput::Elements(u64::from(cell * cell)));

        group.bench_with_input(BenchmarkId::new("filled", cell), &cell, |b, _| {
            let view = filled.pixels().view(0, 0, cell, cell);
            b.iter(|| bounding_rect(black_box(&view), Visibility::Alpha))
        });
        group.bench_with_input(BenchmarkId::new("empty", cell), &cell, |b, _| {
            b.iter(|| bounding_rect(black_box(&empty), Visibility::Alpha))
        });
    }

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");

    for (name, stride) in [("dense", 1u32), ("sparse", 4)] {
        for grid in [4u32, 8, 16] {
            let sheet = make_sheet(grid, grid, 32, stride);
            group.throughput(Throughput::Elements(u64::from(grid * grid)));
            group.bench_with_input(BenchmarkId::new(name, grid), &sheet, |b, sheet| {
                b.iter(|| slice(black_box(sheet), 32, 32, "bench.png", Background::Auto))
            });
        }
    }

    group.finish();
}

fn bench_overview(c: &mut Criterion) {
    let mut group = c.benchmark_group("overview");

    for grid in [4u32, 16] {
        let sheet = make_sheet(grid, grid, 32, 1);
        let entity = match slice(&sheet, 32, 32, "bench.png", Background::Auto) {
            Ok(entity) => entity,
            Err(e) => panic!("bench sheet should slice: {}", e),
        };
        group.bench_with_input(BenchmarkId::from_parameter(grid), &entity, |b, entity| {
            b.iter(|| render_overview(black_box(entity)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bounding_rect, bench_slice, bench_overview);
criterion_main!(benches);
