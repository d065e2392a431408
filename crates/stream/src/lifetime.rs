use scrollworld_common::{SegmentId, Viewport};

use crate::frontier::SpawnedSegment;
use crate::host::SegmentHost;

/// Retires one placed segment once it has scrolled out behind the viewport.
///
/// Segments are measured from their placement point, so a segment is only
/// retired when the trailing edge is more than a full segment width past
/// that point. Retirement is terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLifetime {
    id: SegmentId,
    position: f32,
    width: f32,
    half_width: f32,
    retired: bool,
}

impl SegmentLifetime {
    pub fn new(id: SegmentId, position: f32, width: f32, viewport: &Viewport) -> Self {
        Self {
            id,
            position,
            width,
            half_width: viewport.half_width(),
            retired: false,
        }
    }

    /// Lifetime for a segment the stream just placed.
    pub fn for_spawned(segment: &SpawnedSegment, viewport: &Viewport) -> Self {
        Self::new(segment.id, segment.position.x, segment.width, viewport)
    }

    /// Whether a viewport centered at `viewport_center` has left this
    /// segment behind by more than its width. Equality keeps it live.
    pub fn is_out_of_view(&self, viewport_center: f32) -> bool {
        let trailing_edge = viewport_center - self.half_width;
        self.position < trailing_edge && (trailing_edge - self.position).abs() > self.width
    }

    /// Destroy the segment through `host` if it is out of view. Returns true
    /// only on the tick that retires it; later calls do nothing.
    pub fn tick(&mut self, viewport_center: f32, host: &mut impl SegmentHost) -> bool {
        if self.retired || !self.is_out_of_view(viewport_center) {
            return false;
        }
        host.destroy(self.id);
        self.retired = true;
        tracing::debug!(id = %self.id, x = self.position, width = self.width, "retired segment");
        true
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }
}

/// The lifetimes of every live segment, ticked together.
#[derive(Debug, Default)]
pub struct LifetimeRegistry {
    live: Vec<SegmentLifetime>,
}

impl LifetimeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, lifetime: SegmentLifetime) {
        self.live.push(lifetime);
    }

    /// Tick every live lifetime once. Retired lifetimes are dropped from the
    /// registry; their ids are returned in spawn order.
    pub fn tick(&mut self, viewport_center: f32, host: &mut impl SegmentHost) -> Vec<SegmentId> {
        let mut retired = Vec::new();
        self.live.retain_mut(|lifetime| {
            if lifetime.tick(viewport_center, host) {
                retired.push(lifetime.id());
                false
            } else {
                true
            }
        });
        retired
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SegmentLifetime> {
        self.live.iter()
    }
}
