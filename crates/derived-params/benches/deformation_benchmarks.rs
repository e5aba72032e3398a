//! Benchmarks for deformation and variadic addition.
//!
//! Run with: cargo bench --package derived-params --bench deformation_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use derived_params::{add, deformation, to_polar, Grid, Spacing, Value, VectorField, WorldWrap};
use rand::Rng;

/// Generate a U/V wind field with a zonal pattern plus noise.
fn generate_wind_field(rows: usize, cols: usize) -> VectorField {
    let mut rng = rand::thread_rng();
    let mut u_data = vec![0.0f32; rows * cols];
    let mut v_data = vec![0.0f32; rows * cols];

    for y in 0..rows {
        for x in 0..cols {
            let base_u = ((x as f32 / cols as f32) * std::f32::consts::PI * 2.0).sin() * 15.0;
            let base_v = ((y as f32 / rows as f32) * std::f32::consts::PI * 2.0).cos() * 15.0;

            u_data[y * cols + x] = base_u + rng.gen_range(-5.0..5.0);
            v_data[y * cols + x] = base_v + rng.gen_range(-5.0..5.0);
        }
    }

    VectorField::from_components(
        Grid::new(vec![rows, cols], u_data).expect("u grid"),
        Grid::new(vec![rows, cols], v_data).expect("v grid"),
    )
    .expect("wind field")
}

/// Per-row lat/lon spacing in metres for a global grid.
fn latlon_spacing(rows: usize, cols: usize) -> (Spacing, Spacing) {
    let step = 180.0 / (rows - 1) as f32;
    let mut dx = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let lat = (90.0 - row as f32 * step).to_radians();
        dx.extend(std::iter::repeat(111_195.0 * step * lat.cos().max(1e-3)).take(cols));
    }
    let dx = Grid::new(vec![rows, cols], dx).expect("dx grid");
    (Spacing::Varying(dx), Spacing::Uniform(111_195.0 * step))
}

// =============================================================================
// DEFORMATION BENCHMARKS
// =============================================================================

fn bench_deformation(c: &mut Criterion) {
    let mut group = c.benchmark_group("deformation");

    let configs = [
        (181, 360, "global_1deg"),
        (361, 720, "global_0p5deg"),
        (1059, 1799, "hrrr_conus"),
    ];

    for (rows, cols, name) in configs {
        let field = generate_wind_field(rows, cols);
        let spacing = Spacing::Uniform(3000.0);
        group.throughput(Throughput::Elements((rows * cols) as u64));

        group.bench_with_input(BenchmarkId::new("uniform", name), &field, |b, field| {
            b.iter(|| {
                deformation(
                    black_box(field),
                    &spacing,
                    &spacing,
                    WorldWrap::Disabled,
                )
            });
        });
    }

    group.finish();
}

fn bench_world_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("deformation_world_wrap");

    for (rows, cols, name) in [(181, 360, "global_1deg"), (721, 1440, "global_0p25deg")] {
        let field = generate_wind_field(rows, cols);
        let (dx, dy) = latlon_spacing(rows, cols);
        group.throughput(Throughput::Elements((rows * cols) as u64));

        group.bench_with_input(BenchmarkId::new("disabled", name), &field, |b, field| {
            b.iter(|| deformation(black_box(field), &dx, &dy, WorldWrap::Disabled));
        });

        group.bench_with_input(BenchmarkId::new("cyclic", name), &field, |b, field| {
            b.iter(|| {
                deformation(
                    black_box(field),
                    &dx,
                    &dy,
                    WorldWrap::Cyclic { columns: 1 },
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// ADDITION AND CONVERSION BENCHMARKS
// =============================================================================

fn bench_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("addition");

    let (rows, cols) = (181, 360);
    let fields: Vec<VectorField> = (0..4).map(|_| generate_wind_field(rows, cols)).collect();
    group.throughput(Throughput::Elements((rows * cols) as u64));

    for operands in [2, 4] {
        let scalars: Vec<Value> = fields[..operands]
            .iter()
            .map(|f| Value::Grid(f.u().clone()))
            .collect();
        group.bench_with_input(BenchmarkId::new("scalar", operands), &scalars, |b, args| {
            b.iter(|| add(black_box(args.clone())));
        });

        let vectors: Vec<Value> = fields[..operands]
            .iter()
            .cloned()
            .map(Value::Vector)
            .collect();
        group.bench_with_input(BenchmarkId::new("vector", operands), &vectors, |b, args| {
            b.iter(|| add(black_box(args.clone())));
        });
    }

    group.finish();
}

fn bench_to_polar(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_polar");

    let field = generate_wind_field(181, 360);
    group.throughput(Throughput::Elements(field.u().len() as u64));
    group.bench_function("global_1deg", |b| {
        b.iter(|| to_polar(black_box(&field)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_deformation,
    bench_world_wrap,
    bench_addition,
    bench_to_polar,
);

criterion_main!(benches);
