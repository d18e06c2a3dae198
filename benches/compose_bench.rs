use criterion::{criterion_group, criterion_main, Criterion};

use image::{Rgba, RgbaImage};
use spritepress::{compose, plan_layout, ImageHandle};

fn bench_plan_layout(c: &mut Criterion) {
    let dims: Vec<(u32, u32)> = (0..1000).map(|i| (16 + (i % 48), 16 + (i % 64))).collect();

    c.bench_function("plan_layout_1000", |b| {
        b.iter(|| {
            let layout = plan_layout(&dims).unwrap();
            assert_eq!(layout.slots.len(), dims.len());
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let handles: Vec<ImageHandle> = (0..16)
        .map(|i| {
            let img = RgbaImage::from_pixel(64, 64, Rgba([i as u8, 0, 0, 255]));
            ImageHandle::from_image(format!("img-{}", i), img)
        })
        .collect();

    c.bench_function("compose_16x64x64", |b| {
        b.iter(|| {
            let sheet = compose(&handles).unwrap();
            assert_eq!(sheet.width(), 16 * 64);
        })
    });
}

criterion_group!(benches, bench_plan_layout, bench_compose);
criterion_main!(benches);
