use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scrollworld_common::{SegmentId, Viewport};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::frontier::{SegmentStream, SpawnedSegment};
use crate::host::SegmentHost;
use crate::lifetime::{LifetimeRegistry, SegmentLifetime};

/// What one level tick changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<SpawnedSegment>,
    pub retired: Vec<SegmentId>,
}

/// Running streaming statistics for instrumentation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamStats {
    pub ticks: u64,
    pub spawned_total: u64,
    pub retired_total: u64,
    pub live_segments: usize,
    pub frontier: f32,
    pub tick_time: Duration,
}

/// A segment stream and the lifetimes of everything it has placed.
///
/// Spawning and retirement share no state; they only agree through world
/// positions and widths. This type just runs both once per tick and attaches
/// a lifetime to every spawned segment.
pub struct LevelStreamer<R = ChaCha8Rng> {
    stream: SegmentStream<R>,
    lifetimes: LifetimeRegistry,
    viewport: Viewport,
    stats: StreamStats,
}

impl LevelStreamer<ChaCha8Rng> {
    pub fn with_seed(
        config: &StreamConfig,
        viewport: &Viewport,
        seed: u64,
    ) -> Result<Self, StreamError> {
        Self::new(config, viewport, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> LevelStreamer<R> {
    pub fn new(config: &StreamConfig, viewport: &Viewport, rng: R) -> Result<Self, StreamError> {
        Ok(Self {
            stream: SegmentStream::new(config, viewport, rng)?,
            lifetimes: LifetimeRegistry::new(),
            viewport: *viewport,
            stats: StreamStats::default(),
        })
    }

    /// Place the start segment and pre-fill the initial viewport.
    pub fn start(
        &mut self,
        host: &mut impl SegmentHost,
    ) -> Result<Vec<SpawnedSegment>, StreamError> {
        let spawned = self.stream.initialize(host)?;
        for segment in &spawned {
            self.lifetimes.track(SegmentLifetime::for_spawned(segment, &self.viewport));
        }
        self.stats.spawned_total = spawned.len() as u64;
        self.stats.live_segments = self.lifetimes.len();
        self.stats.frontier = self.stream.frontier_position();
        Ok(spawned)
    }

    /// Run one streaming tick for a viewport centered at `viewport_center`.
    pub fn tick(&mut self, viewport_center: f32, host: &mut impl SegmentHost) -> TickReport {
        let _span = tracing::info_span!("level_tick", center = viewport_center).entered();
        let tick_start = Instant::now();

        let spawned = self.stream.tick(viewport_center, host);
        if let Some(segment) = &spawned {
            self.lifetimes.track(SegmentLifetime::for_spawned(segment, &self.viewport));
        }
        let retired = self.lifetimes.tick(viewport_center, host);

        self.stats.ticks += 1;
        self.stats.spawned_total += spawned.is_some() as u64;
        self.stats.retired_total += retired.len() as u64;
        self.stats.live_segments = self.lifetimes.len();
        self.stats.frontier = self.stream.frontier_position();
        self.stats.tick_time = tick_start.elapsed();

        tracing::trace!(
            spawned = spawned.is_some(),
            retired = retired.len(),
            live = self.lifetimes.len(),
            "level tick complete"
        );

        TickReport { spawned, retired }
    }

    pub fn stream(&self) -> &SegmentStream<R> {
        &self.stream
    }

    pub fn lifetimes(&self) -> &LifetimeRegistry {
        &self.lifetimes
    }

    /// Statistics as of the last tick.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}
