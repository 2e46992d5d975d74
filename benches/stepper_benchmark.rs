//! Extrapolation stepper benchmarks
//!
//! Measures macro-step throughput for serial and parallel execution at
//! different state sizes, and the partitioner on the scheme sequences.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DVector;

use exstep::config::SCHEMES;
use exstep::partition::partition;
use exstep::ExtrapolationStepper;

/// Linear diffusion-like coupling: dy_i/dt = y_{i-1} - 2 y_i + y_{i+1}
fn laplacian(_t: f64, y: &DVector<f64>) -> DVector<f64> {
    let n = y.len();
    DVector::from_fn(n, |ii, _| {
        let left = if ii > 0 { y[ii - 1] } else { 0.0 };
        let right = if ii + 1 < n { y[ii + 1] } else { 0.0 };
        left - 2.0 * y[ii] + right
    })
}

fn bench_macro_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("Macro-step order 8 cores 3");

    for size in [64usize, 256, 1024].iter() {
        let y0 = DVector::from_element(*size, 1.0);
        let dt = 1e-4;

        group.bench_with_input(BenchmarkId::new("serial", size), size, |b, _| {
            let mut stepper = ExtrapolationStepper::new(laplacian, &y0, 8, 3, false).unwrap();
            let mut y = y0.clone();
            b.iter(|| {
                stepper.step(&mut y, 0.0, black_box(dt), 1);
            });
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            let mut stepper = ExtrapolationStepper::new(laplacian, &y0, 8, 3, true).unwrap();
            let mut y = y0.clone();
            b.iter(|| {
                stepper.step(&mut y, 0.0, black_box(dt), 1);
            });
        });
    }

    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    c.bench_function("Partition scheme sequences", |b| {
        b.iter(|| {
            for scheme in &SCHEMES {
                black_box(partition(black_box(scheme.step_counts)));
            }
        });
    });
}

criterion_group!(benches, bench_macro_step, bench_partition);
criterion_main!(benches);
