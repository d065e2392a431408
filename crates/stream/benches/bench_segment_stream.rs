use std::hint::black_box;
use std::time::Instant;

use scrollworld_common::Viewport;
use scrollworld_kernel::World;
use scrollworld_stream::{LevelStreamer, SegmentStream, SegmentVariant, StreamConfig};

fn make_config(variant_count: usize) -> StreamConfig {
    StreamConfig {
        catalog: (0..variant_count)
            .map(|i| SegmentVariant::new(format!("v{i}"), format!("segments/v{i}"), 4.0 + i as f32))
            .collect(),
        ..StreamConfig::default()
    }
}

fn bench_initialize(half_width: f32, iterations: usize) {
    let config = make_config(8);
    let viewport = Viewport::new(0.0, half_width).expect("viewport");

    let start = Instant::now();
    for seed in 0..iterations {
        let mut stream = SegmentStream::with_seed(&config, &viewport, seed as u64).expect("stream");
        let mut world = World::new();
        let _ = black_box(stream.initialize(&mut world));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  initialize (half-width {half_width}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_level_tick(speed: f32, ticks: usize) {
    let config = make_config(8);
    let mut viewport = Viewport::new(0.0, 20.0).expect("viewport");
    let mut level = LevelStreamer::with_seed(&config, &viewport, 42).expect("level");
    let mut world = World::new();
    level.start(&mut world).expect("start");

    let start = Instant::now();
    for _ in 0..ticks {
        viewport.scroll(speed);
        let _ = black_box(level.tick(black_box(viewport.center()), &mut world));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / ticks as u32;
    println!(
        "  level tick (speed {speed}, {ticks} ticks, {} live): {per_iter:?}/tick, total {elapsed:?}",
        level.stats().live_segments
    );
}

fn main() {
    println!("=== Segment Stream Benchmarks ===\n");

    println!("Initialize:");
    bench_initialize(20.0, 1000);
    bench_initialize(200.0, 1000);
    bench_initialize(2000.0, 100);

    println!("\nLevel tick (spawn + retire):");
    bench_level_tick(0.1, 100_000);
    bench_level_tick(1.0, 100_000);
    bench_level_tick(3.0, 100_000);

    println!("\n=== Done ===");
}
