//! Performance benchmarks for tensode-ode
//!
//! Run with: cargo bench -p tensode-ode
//!
//! Benchmarks cover:
//! - Single RK4 steps over growing state sizes
//! - Full adaptive integration with loose and tight tolerances

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tensode_core::{RealField, Tensor, TensorResult};
use tensode_kernels::TensorField;
use tensode_ode::{integrate, rk4_step};

type Reals = TensorField<f64, RealField>;

fn decay(field: &Reals) -> impl FnMut(f64, &Tensor<f64>) -> TensorResult<Tensor<f64>> + '_ {
    move |_t, y| field.neg(y)
}

fn bench_rk4_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("rk4_step");
    let field: Reals = TensorField::new(RealField);

    for &len in [2, 64, 1024].iter() {
        let y = Tensor::from_fn(1, len, |i| i[0] as f64).unwrap_or_else(|_| Tensor::scalar(0.0));
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("vector", len), &len, |bencher, _| {
            let mut derivative = decay(&field);
            bencher.iter(|| black_box(rk4_step(0.0, 0.01, &y, &mut derivative, &field)));
        });
    }
    group.finish();
}

fn bench_integrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrate");
    group.sample_size(20);
    let field: Reals = TensorField::new(RealField);
    let y0 = Tensor::new(1, 2, vec![1.0, 0.5]).unwrap_or_else(|_| Tensor::scalar(1.0));

    for &tolerance in [1e-6, 1e-12, 1e-20].iter() {
        group.bench_with_input(
            BenchmarkId::new("decay", format!("{:e}", tolerance)),
            &tolerance,
            |bencher, &tolerance| {
                bencher.iter(|| {
                    black_box(integrate(
                        0.0,
                        1.0,
                        0.1,
                        1e-6,
                        |err: &f64| *err > tolerance,
                        &y0,
                        decay(&field),
                        &field,
                    ))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_rk4_step, bench_integrate);
criterion_main!(benches);
