use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scrollworld_common::{SegmentId, Viewport, ViewportError};

use crate::catalog::{CatalogEntry, SegmentCatalog};
use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::host::SegmentHost;

/// A segment the stream has just placed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedSegment {
    pub id: SegmentId,
    pub variant: String,
    pub position: Vec3,
    pub width: f32,
}

/// Keeps the world ahead of the viewport populated.
///
/// The frontier is the placement point of the most recently spawned segment.
/// The next segment lands at `frontier + frontier_width + gap`, so for two
/// consecutive segments `next.x == prev.x + prev.width + gap` always holds
/// and the frontier never decreases.
pub struct SegmentStream<R = ChaCha8Rng> {
    catalog: SegmentCatalog,
    gap: f32,
    half_width: f32,
    initial_center: f32,
    frontier: Vec3,
    frontier_width: f32,
    initialized: bool,
    rng: R,
}

impl SegmentStream<ChaCha8Rng> {
    /// Stream drawing variants from a seeded ChaCha8 generator.
    pub fn with_seed(
        config: &StreamConfig,
        viewport: &Viewport,
        seed: u64,
    ) -> Result<Self, StreamError> {
        Self::new(config, viewport, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SegmentStream<R> {
    /// Validate `config` and capture the viewport's half-width and initial
    /// center. Nothing is placed until [`initialize`](Self::initialize).
    pub fn new(config: &StreamConfig, viewport: &Viewport, rng: R) -> Result<Self, StreamError> {
        let catalog = config.validate()?;
        if !viewport.center().is_finite() {
            return Err(ViewportError::InvalidCenter(viewport.center()).into());
        }
        if !viewport.half_width().is_finite() || viewport.half_width() < 0.0 {
            return Err(ViewportError::InvalidHalfWidth(viewport.half_width()).into());
        }
        Ok(Self {
            catalog,
            gap: config.gap,
            half_width: viewport.half_width(),
            initial_center: viewport.center(),
            frontier: config.start_position,
            frontier_width: 0.0,
            initialized: false,
            rng,
        })
    }

    /// Place the start segment, then pre-fill until the frontier is past the
    /// initial viewport's far edge. Can only run once.
    ///
    /// Fails with [`StreamError::Stalled`] if positions are so large that a
    /// spawn would not move the frontier; anything placed so far is
    /// destroyed again.
    pub fn initialize(
        &mut self,
        host: &mut impl SegmentHost,
    ) -> Result<Vec<SpawnedSegment>, StreamError> {
        if self.initialized {
            return Err(StreamError::AlreadyInitialized);
        }
        self.initialized = true;

        let start = self.catalog.start().clone();
        let mut spawned = vec![self.place(&start, host)];

        let far_edge = self.initial_center + self.half_width;
        while self.frontier.x <= far_edge {
            if !self.can_advance() {
                for segment in &spawned {
                    host.destroy(segment.id);
                }
                tracing::error!(frontier = self.frontier.x, far_edge, "pre-fill stalled");
                return Err(StreamError::Stalled(self.frontier.x));
            }
            spawned.push(self.spawn_next(host));
        }

        tracing::info!(
            segments = spawned.len(),
            frontier = self.frontier.x,
            far_edge,
            "segment stream initialized"
        );
        Ok(spawned)
    }

    /// Whether a tick at `viewport_center` would spawn: the frontier is
    /// within one frontier-segment width of the viewport's far edge.
    pub fn should_spawn(&self, viewport_center: f32) -> bool {
        let far_edge = viewport_center + self.half_width;
        (self.frontier.x - far_edge).abs() < self.frontier_width
    }

    /// Spawn at most one segment if the frontier is close to the far edge.
    /// Does nothing before the stream is initialized.
    pub fn tick(
        &mut self,
        viewport_center: f32,
        host: &mut impl SegmentHost,
    ) -> Option<SpawnedSegment> {
        if !self.initialized || !self.should_spawn(viewport_center) {
            return None;
        }
        if !self.can_advance() {
            tracing::debug!(frontier = self.frontier.x, "frontier cannot advance, skipping spawn");
            return None;
        }
        Some(self.spawn_next(host))
    }

    /// False when the next step is lost to f32 rounding at the frontier.
    /// A zero step (zero-width frontier, zero gap) still counts as advancing:
    /// the next draw may be wider.
    fn can_advance(&self) -> bool {
        let step = self.frontier_width + self.gap;
        step == 0.0 || self.frontier.x + step > self.frontier.x
    }

    /// Draw a random variant and place it past the current frontier.
    fn spawn_next(&mut self, host: &mut impl SegmentHost) -> SpawnedSegment {
        let entry = self.catalog.pick(&mut self.rng).clone();
        // Advance by the previous width before it is replaced.
        self.frontier.x += self.frontier_width + self.gap;
        self.place(&entry, host)
    }

    fn place(&mut self, entry: &CatalogEntry, host: &mut impl SegmentHost) -> SpawnedSegment {
        let id = host.instantiate(entry.variant(), self.frontier, entry.width());
        self.frontier_width = entry.width();
        tracing::debug!(
            %id,
            variant = entry.name(),
            x = self.frontier.x,
            width = entry.width(),
            "spawned segment"
        );
        SpawnedSegment {
            id,
            variant: entry.name().to_string(),
            position: self.frontier,
            width: entry.width(),
        }
    }

    /// Placement X of the most recently spawned segment.
    pub fn frontier_position(&self) -> f32 {
        self.frontier.x
    }

    /// Width of the most recently spawned segment.
    pub fn frontier_width(&self) -> f32 {
        self.frontier_width
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn catalog(&self) -> &SegmentCatalog {
        &self.catalog
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
