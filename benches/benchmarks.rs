/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use epr_gen::cross_section::{aggregate, create_cross_section_on_union_energy_grid, Threshold};
use epr_gen::distribution::TabularDistribution;
use epr_gen::grid::{GridGenerator, InterpolationType, UnionGridBuilder};

fn log_table(start: f64, end: f64, n: usize, f: impl Fn(f64) -> f64) -> TabularDistribution {
    let step = (end / start).ln() / (n - 1) as f64;
    let x: Vec<f64> = (0..n).map(|i| start * (step * i as f64).exp()).collect();
    let y = x.iter().map(|&e| f(e)).collect();
    TabularDistribution::new(x, y, InterpolationType::LogLog).unwrap()
}

fn grid_generation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid Generation");
    let generator = GridGenerator::new(1e-3, 1e-42, 1e-16).unwrap();

    group.bench_function("damped_oscillation", |b| {
        let f = |x: f64| (-x / 5.0).exp() * (2.0 + x.sin());
        b.iter(|| {
            let mut grid = vec![0.0, 10.0, 20.0];
            black_box(generator.generate_and_evaluate_in_place(&mut grid, &f).unwrap());
        })
    });

    group.bench_function("power_law_log_log", |b| {
        let mut log_generator = generator.clone();
        log_generator.with_interpolation(InterpolationType::LogLog);
        let f = |x: f64| 1.0 / (x * x) + 1.0 / x;
        b.iter(|| {
            let mut grid = vec![1e-3, 1e3];
            black_box(log_generator.generate_and_evaluate_in_place(&mut grid, &f).unwrap());
        })
    });

    group.finish();
}

fn union_grid_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Union Grid");
    let generator = GridGenerator::new(1e-3, 1e-42, 1e-16).unwrap();

    let incoherent = log_table(1e-6, 1e5, 80, |e| 0.6 * e / (1e-3 + e) / (1.0 + e));
    let coherent = log_table(1e-6, 1e5, 80, |e| 1e-4 / (1e-4 + e * e));
    let photoelectric = log_table(1.36e-5, 1e5, 50, |e| 6e-3 * (1.36e-5 / e).powi(3));

    group.bench_function("build_and_resolve", |b| {
        b.iter(|| {
            let mut builder = UnionGridBuilder::new("photon", 1e-3, 20.0, generator.clone()).unwrap();
            builder.refine("incoherent", &incoherent).unwrap();
            builder.refine("coherent", &coherent).unwrap();
            builder.refine("photoelectric", &photoelectric).unwrap();
            let grid = builder.finalize();

            let parts = [&incoherent, &coherent, &photoelectric]
                .iter()
                .map(|process| {
                    create_cross_section_on_union_energy_grid(&grid, *process, Threshold::new(0.0, false))
                        .unwrap()
                })
                .collect::<Vec<_>>();
            let slices: Vec<&[f64]> = parts.iter().map(|p| p.values.as_slice()).collect();
            black_box(aggregate(grid.len(), &slices).unwrap());
        })
    });

    group.finish();
}

criterion_group!(benches, grid_generation_benchmark, union_grid_benchmark);
criterion_main!(benches);
