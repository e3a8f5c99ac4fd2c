use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use flipgrid_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Wall-sized grid with a mix of group sizes already placed.
fn populated_grid(cols: Coord, rows: Coord) -> FlipGrid {
    let mut grid = FlipGrid::with_size(cols, rows, 64.0).expect("valid grid");
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let sizes = [(3, 3), (2, 2), (2, 1), (1, 2), (1, 1)];

    for (i, &size) in sizes.iter().cycle().take(usize::from(cols) * 2).enumerate() {
        grid.flip_random(
            size,
            Some(format!("img{i}.png").into()),
            TargetFilter::UnoccupiedOnly,
            &mut rng,
            &mut NullRenderer,
        )
        .expect("flip succeeds");
    }
    grid
}

fn bench_availability(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability");

    for (cols, rows) in [(12, 8), (32, 24)] {
        let grid = populated_grid(cols, rows);

        group.bench_function(format!("get_available_2x2/{cols}x{rows}"), |b| {
            b.iter(|| grid.get_available(black_box((2, 2)), 0, TargetFilter::AnyCell))
        });
        group.bench_function(format!("get_available_unoccupied_1x1/{cols}x{rows}"), |b| {
            b.iter(|| grid.get_available(black_box((1, 1)), 0, TargetFilter::UnoccupiedOnly))
        });
        group.bench_function(format!("flip_random_3x3/{cols}x{rows}"), |b| {
            let mut rng = SmallRng::seed_from_u64(1);
            b.iter_batched(
                || grid.clone(),
                |mut grid| {
                    grid.flip_random(
                        (3, 3),
                        Some("bench.png".into()),
                        TargetFilter::AnyCell,
                        &mut rng,
                        &mut NullRenderer,
                    )
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_availability);
criterion_main!(benches);
