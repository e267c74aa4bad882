//! # BlockLife Subsystem Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | bl-01 Grid | Validated placement through the service | < 50µs |
//! | bl-01 Grid | Position lookup on a full grid | < 1µs |
//! | bl-02 Patterns | Flood fill from a trigger | < 100µs on 32x32 |

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bl_01_grid::{
    BlockRepository, GridApi, GridConfig, GridService, InMemoryGridStore, PlaceBlockCommand,
};
use bl_02_patterns::find_match;
use shared_bus::{CancellationToken, InMemoryEventBus};
use shared_types::{Block, BlockType, FixedTimeSource, Position, TimeSource};

fn checkerboard(size: i32) -> Vec<Block> {
    let now = FixedTimeSource::default().now();
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .map(|(x, y)| {
            let block_type = if (x + y) % 2 == 0 { BlockType::Work } else { BlockType::Fun };
            Block::new(block_type, Position::new(x, y), now)
        })
        .collect()
}

fn uniform(size: i32) -> Vec<Block> {
    let now = FixedTimeSource::default().now();
    (0..size)
        .flat_map(|y| (0..size).map(move |x| Block::new(BlockType::Health, Position::new(x, y), now)))
        .collect()
}

// ============================================================================
// BL-01: Grid
// ============================================================================

fn bench_grid_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("bl-01-grid");
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");

    for size in [10, 32] {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("fill_grid", size), &size, |b, &size| {
            b.iter(|| {
                let service = GridService::new(
                    Arc::new(InMemoryGridStore::new(&GridConfig::new(size, size))),
                    Arc::new(InMemoryEventBus::new()),
                    Arc::new(FixedTimeSource::default()),
                );
                let cancel = CancellationToken::none();
                rt.block_on(async {
                    for y in 0..size {
                        for x in 0..size {
                            let command = PlaceBlockCommand::new(BlockType::Study, (x, y));
                            black_box(service.place_block(command, &cancel).await.ok());
                        }
                    }
                });
            })
        });
    }

    let store = InMemoryGridStore::new(&GridConfig::new(32, 32));
    for block in checkerboard(32) {
        store.add(block).expect("fits");
    }
    group.bench_function("lookup_full_grid", |b| {
        b.iter(|| black_box(store.get_at_position(black_box(Position::new(17, 23)))))
    });

    group.finish();
}

// ============================================================================
// BL-02: Pattern matching
// ============================================================================

fn bench_find_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("bl-02-patterns");

    for size in [10, 32] {
        let mixed = checkerboard(size);
        group.bench_with_input(BenchmarkId::new("no_match", size), &mixed, |b, blocks| {
            b.iter(|| black_box(find_match(blocks, Position::new(0, 0), 3)))
        });

        let solid = uniform(size);
        group.throughput(Throughput::Elements(solid.len() as u64));
        group.bench_with_input(BenchmarkId::new("whole_grid_match", size), &solid, |b, blocks| {
            b.iter(|| black_box(find_match(blocks, Position::new(size / 2, size / 2), 3)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_placement, bench_find_match);
criterion_main!(benches);
