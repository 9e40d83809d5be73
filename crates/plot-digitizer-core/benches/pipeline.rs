use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use plot_digitizer_core::{
    classify_intensities, extract_trajectory, Correspondences, Digitizer, GrayImage,
    IntensityParams,
};

/// White 1024x768 canvas with a three-pixel-thick sine curve and black axes.
fn synthetic_plot() -> GrayImage {
    let (w, h) = (1024usize, 768usize);
    let mut img = GrayImage::filled(w, h, 255);
    for x in 0..w {
        img.set(x, h - 40, 0);
    }
    for y in 0..h {
        img.set(40, y, 0);
    }
    for x in 41..w {
        let t = (x - 41) as f64 / (w - 41) as f64;
        let yc = (h as f64 / 2.0 - 250.0 * (t * std::f64::consts::TAU).sin()) as i64;
        for dy in -1..=1 {
            img.put_clipped(x as i64, yc + dy, 0);
        }
    }
    img
}

fn correspondences() -> Correspondences {
    Correspondences::new(
        vec![Point2::new(0.0, -1.0), Point2::new(1.0, 1.0)],
        vec![Point2::new(41.0, 634.0), Point2::new(1023.0, 134.0)],
    )
    .expect("equal lengths")
}

fn bench_pipeline(c: &mut Criterion) {
    let img = synthetic_plot();
    let view = img.view();
    let corr = correspondences();
    let digitizer = Digitizer::default();

    c.bench_function("classify_1024x768", |b| {
        b.iter(|| classify_intensities(black_box(&view), &IntensityParams::default()))
    });

    let result = digitizer.digitize(&view, &corr).expect("digitize");
    c.bench_function("extract_1024x768", |b| {
        b.iter(|| extract_trajectory(black_box(&view), 0, &result.transform))
    });

    c.bench_function("digitize_1024x768", |b| {
        b.iter(|| digitizer.digitize(black_box(&view), &corr))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
