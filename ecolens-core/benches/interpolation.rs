//! Criterion benchmarks for the spatial engines.
//!
//! Benchmarks:
//!   - kriging grid at 20 / 50 / 100 cells per side over six readings
//!   - IDW grid at the same resolutions
//!   - green route between two camera sites
//!
//! Run with: cargo bench -p ecolens-core --bench interpolation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ecolens_core::{GeoPoint, GridBounds, Interpolator, PollutionSample, RoutePlanner, RoutingConfig};

fn city_samples() -> Vec<PollutionSample> {
    vec![
        PollutionSample::new(40.7580, -73.9855, 35.0),
        PollutionSample::new(40.7061, -73.9969, 22.0),
        PollutionSample::new(40.7648, -73.9724, 12.0),
        PollutionSample::new(40.7074, -74.0113, 28.0),
        PollutionSample::new(40.8116, -73.9465, 18.0),
        PollutionSample::new(40.7282, -73.7949, 25.0),
    ]
}

// ---------------------------------------------------------------------------
// Benchmark: grid interpolation
// ---------------------------------------------------------------------------

fn bench_grids(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation_grid");
    group.sample_size(20);

    let samples = city_samples();
    let bounds = GridBounds::default();

    for resolution in [20usize, 50, 100] {
        group.bench_with_input(BenchmarkId::new("kriging", resolution), &resolution, |b, &res| {
            let mut interp = Interpolator::default();
            b.iter(|| black_box(interp.generate_grid_with(black_box(&samples), &bounds, res)));
        });

        group.bench_with_input(BenchmarkId::new("idw", resolution), &resolution, |b, &res| {
            let interp = Interpolator::default();
            b.iter(|| black_box(interp.idw_grid(black_box(&samples), &bounds, res)));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: route planning
// ---------------------------------------------------------------------------

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    group.sample_size(20);

    let mut planner = RoutePlanner::new(RoutingConfig::default());
    planner.update_readings(city_samples());
    let from = GeoPoint::new(40.7580, -73.9855);
    let to = GeoPoint::new(40.7074, -74.0113);

    group.bench_function("times_square_to_wall_street", |b| {
        b.iter(|| black_box(planner.find_route(black_box(&from), black_box(&to))));
    });

    group.finish();
}

criterion_group!(benches, bench_grids, bench_route);
criterion_main!(benches);
