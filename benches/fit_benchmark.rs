use criterion::{Criterion, criterion_group, criterion_main};
use pipebench::fit::fit_log_log;
use pipebench::plot::{extrapolate, log_space};
use std::hint::black_box;

fn bench_fit(c: &mut Criterion) {
    let sizes = log_space(50.0, 50_000.0, 64);
    let durations: Vec<f64> = sizes.iter().map(|s| 3e-7 * s.powf(1.05)).collect();

    c.bench_function("fit_log_log_64_points", |b| {
        b.iter(|| fit_log_log(black_box(&sizes), black_box(&durations)))
    });

    let fit = match fit_log_log(&sizes, &durations) {
        Ok(fit) => fit,
        Err(e) => panic!("benchmark fixture does not fit: {e}"),
    };
    c.bench_function("extrapolate_64_points", |b| {
        b.iter(|| extrapolate(black_box(&fit), black_box(&sizes)))
    });
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
