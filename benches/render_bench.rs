use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};

use storekit::catalog::{DeviceTier, SHOTS};
use storekit::rendering::paint::backdrop;
use storekit::screenshots::render_shot;
use storekit::FontSet;

fn bench_render_shot(c: &mut Criterion) {
    let screen = RgbImage::from_fn(390, 844, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 180]));
    let icon = RgbImage::from_pixel(160, 160, Rgb([12, 110, 100]));
    let fonts = FontSet::builtin();

    let phone = DeviceTier::new("phone", 645, 1398, false);
    c.bench_function("render_shot_phone_half_scale", |b| {
        b.iter(|| render_shot(black_box(&phone), &SHOTS[0], &screen, &icon, &fonts).unwrap())
    });

    let tablet = DeviceTier::new("tablet", 1032, 1376, true);
    c.bench_function("render_shot_tablet_half_scale", |b| {
        b.iter(|| render_shot(black_box(&tablet), &SHOTS[2], &screen, &icon, &fonts).unwrap())
    });
}

fn bench_backdrop(c: &mut Criterion) {
    c.bench_function("backdrop_645x1398", |b| {
        b.iter(|| backdrop(black_box(645), black_box(1398), &SHOTS[1].palette).unwrap())
    });
}

criterion_group!(benches, bench_render_shot, bench_backdrop);
criterion_main!(benches);
