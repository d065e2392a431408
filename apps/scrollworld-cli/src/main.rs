use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use scrollworld_common::Viewport;
use scrollworld_kernel::World;
use scrollworld_stream::{LevelStreamer, StreamConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrollworld-cli", about = "CLI tool for scrollworld level streaming")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Load and validate a level config
    Validate {
        /// Path to a YAML level config
        config: PathBuf,
    },
    /// Scroll a camera through a streamed level
    Run {
        /// YAML level config; the built-in level is used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed for segment draws
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Camera movement per tick along X
        #[arg(long, default_value = "0.5")]
        speed: f32,
        /// Display aspect ratio (width / height)
        #[arg(long, default_value = "1.7777778")]
        aspect: f32,
        /// Orthographic camera size (half the visible height)
        #[arg(long, default_value = "5.0")]
        ortho_size: f32,
        /// Print the final stats as JSON instead of per-tick events
        #[arg(long)]
        json: bool,
    },
    /// Check that a seeded run and its event-log replay agree
    Replay {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed for segment draws
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("scrollworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: tick={}", World::new().tick());
            println!("stream: {}", scrollworld_stream::crate_info());
        }
        Commands::Validate { config } => {
            let level = StreamConfig::load(&config)
                .with_context(|| format!("reading {}", config.display()))?;
            let catalog = level.validate()?;
            println!(
                "{}: ok (start `{}` width {}, gap {}, {} variants)",
                config.display(),
                catalog.start().name(),
                catalog.start().width(),
                level.gap,
                catalog.len()
            );
            for entry in catalog.entries() {
                println!(
                    "  {:<16} width {:>6.2}  prefab {}",
                    entry.name(),
                    entry.width(),
                    entry.variant().prefab
                );
            }
        }
        Commands::Run {
            config,
            ticks,
            seed,
            speed,
            aspect,
            ortho_size,
            json,
        } => {
            let level_config = match config {
                Some(path) => StreamConfig::load(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => StreamConfig::default(),
            };
            let mut viewport = Viewport::orthographic(0.0, aspect, ortho_size)?;
            let mut level = LevelStreamer::with_seed(&level_config, &viewport, seed)?;
            let mut world = World::new();

            let prefill = level.start(&mut world)?;
            if !json {
                println!(
                    "Run: seed={seed}, ticks={ticks}, speed={speed}, half-width={:.2}",
                    viewport.half_width()
                );
                for segment in &prefill {
                    println!(
                        "  [pre] spawn {} `{}` at x={:.2}",
                        segment.id, segment.variant, segment.position.x
                    );
                }
            }

            for _ in 0..ticks {
                viewport.scroll(speed);
                let report = level.tick(viewport.center(), &mut world);
                world.step();
                if json {
                    continue;
                }
                if let Some(segment) = &report.spawned {
                    println!(
                        "  [{:>5}] spawn {} `{}` at x={:.2}",
                        world.tick(),
                        segment.id,
                        segment.variant,
                        segment.position.x
                    );
                }
                for id in &report.retired {
                    println!("  [{:>5}] retire {id}", world.tick());
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(level.stats())?);
            } else {
                let stats = level.stats();
                println!(
                    "Done: camera x={:.2}, frontier x={:.2}, spawned={}, retired={}, live={}",
                    viewport.center(),
                    stats.frontier,
                    stats.spawned_total,
                    stats.retired_total,
                    stats.live_segments
                );
            }
        }
        Commands::Replay { ticks, seed } => {
            println!("Deterministic replay: seed={seed}, ticks={ticks}");

            let w1 = simulate(seed, ticks)?;
            let w2 = simulate(seed, ticks)?;
            let replayed = World::replay(w1.events());

            println!(
                "Run 1: tick={}, live={}, hash={:#x}",
                w1.tick(),
                w1.segment_count(),
                w1.state_hash()
            );
            println!(
                "Run 2: tick={}, live={}, hash={:#x}",
                w2.tick(),
                w2.segment_count(),
                w2.state_hash()
            );
            println!(
                "Replay: tick={}, live={}, hash={:#x}",
                replayed.tick(),
                replayed.segment_count(),
                replayed.state_hash()
            );
            let matched =
                w1.state_hash() == w2.state_hash() && w1.state_hash() == replayed.state_hash();
            println!("Match: {}", if matched { "OK" } else { "MISMATCH" });
            if !matched {
                anyhow::bail!("replay diverged");
            }
        }
    }

    Ok(())
}

/// Run the built-in level with a camera scrolling at a fixed speed.
fn simulate(seed: u64, ticks: u64) -> anyhow::Result<World> {
    let mut viewport = Viewport::orthographic(0.0, 16.0 / 9.0, 5.0)?;
    let mut level = LevelStreamer::with_seed(&StreamConfig::default(), &viewport, seed)?;
    let mut world = World::new();
    level.start(&mut world)?;
    for _ in 0..ticks {
        viewport.scroll(0.5);
        level.tick(viewport.center(), &mut world);
        world.step();
    }
    tracing::debug!(live = world.segment_count(), "simulation finished");
    Ok(world)
}
