use glam::Vec3;
use scrollworld_common::SegmentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An event record produced by every mutation to the world.
///
/// The event log is the foundation for replay: applying the same events to
/// an empty world reproduces the same set of live segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Segment was placed.
    Spawned { id: SegmentId, segment: SegmentData },
    /// Segment was removed. Carries the data it had.
    Despawned { id: SegmentId, segment: SegmentData },
    /// Simulation advanced one tick.
    Stepped { tick: u64 },
}

/// Per-segment data stored in the world.
///
/// `width` is copied from the variant's descriptor when the segment is
/// placed and stays fixed for the segment's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentData {
    pub variant: String,
    pub prefab: String,
    pub position: Vec3,
    pub width: f32,
}

/// The authoritative set of live segments.
///
/// Uses BTreeMap keyed by sequential ids, so iteration is spawn order. Since
/// the stream only ever appends ahead, spawn order is also left-to-right.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    segments: BTreeMap<SegmentId, SegmentData>,
    next_id: u64,
    tick: u64,
    /// Append-only event log of all mutations.
    #[serde(skip)]
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of live segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Read-only access to all live segments, in spawn order.
    pub fn segments(&self) -> &BTreeMap<SegmentId, SegmentData> {
        &self.segments
    }

    /// Place a new segment. Returns its id.
    pub fn spawn(&mut self, segment: SegmentData) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.spawn_with_id(id, segment);
        id
    }

    /// Place a segment under a specific id (used for replay).
    pub fn spawn_with_id(&mut self, id: SegmentId, segment: SegmentData) {
        self.next_id = self.next_id.max(id.0 + 1);
        self.segments.insert(id, segment.clone());
        self.event_log.push(WorldEvent::Spawned { id, segment });
    }

    /// Remove a segment. Returns its data if it was live.
    pub fn despawn(&mut self, id: SegmentId) -> Option<SegmentData> {
        let data = self.segments.remove(&id);
        match data {
            Some(ref segment) => self.event_log.push(WorldEvent::Despawned {
                id,
                segment: segment.clone(),
            }),
            None => tracing::warn!(%id, "despawn of a segment that is not live"),
        }
        data
    }

    /// Get a reference to segment data.
    pub fn get(&self, id: SegmentId) -> Option<&SegmentData> {
        self.segments.get(&id)
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.tick += 1;
        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
    }

    /// Reconstruct world state from a sequence of events.
    pub fn replay(events: &[WorldEvent]) -> Self {
        let mut world = Self::new();
        for event in events {
            match event {
                WorldEvent::Spawned { id, segment } => {
                    world.next_id = world.next_id.max(id.0 + 1);
                    world.segments.insert(*id, segment.clone());
                }
                WorldEvent::Despawned { id, .. } => {
                    world.segments.remove(id);
                }
                WorldEvent::Stepped { tick } => {
                    world.tick = *tick;
                }
            }
        }
        world
    }

    /// Compute a deterministic hash of the world state for comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        for (id, segment) in &self.segments {
            mix(&mut h, &id.0.to_le_bytes());
            mix(&mut h, segment.variant.as_bytes());
            mix(&mut h, segment.prefab.as_bytes());
            mix(&mut h, &segment.position.x.to_le_bytes());
            mix(&mut h, &segment.position.y.to_le_bytes());
            mix(&mut h, &segment.position.z.to_le_bytes());
            mix(&mut h, &segment.width.to_le_bytes());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(x: f32, width: f32) -> SegmentData {
        SegmentData {
            variant: "flat".into(),
            prefab: "segments/flat".into(),
            position: Vec3::new(x, 0.0, 0.0),
            width,
        }
    }

    #[test]
    fn world_starts_empty() {
        let w = World::new();
        assert_eq!(w.tick(), 0);
        assert_eq!(w.segment_count(), 0);
    }

    #[test]
    fn spawn_and_despawn() {
        let mut w = World::new();
        let id = w.spawn(segment(0.0, 5.0));
        assert_eq!(w.segment_count(), 1);
        assert_eq!(w.get(id).unwrap().width, 5.0);

        assert!(w.despawn(id).is_some());
        assert_eq!(w.segment_count(), 0);
    }

    #[test]
    fn despawn_twice_logs_once() {
        let mut w = World::new();
        let id = w.spawn(segment(0.0, 5.0));
        assert!(w.despawn(id).is_some());
        assert!(w.despawn(id).is_none());
        // spawn + one despawn
        assert_eq!(w.events().len(), 2);
    }

    #[test]
    fn ids_are_sequential() {
        let mut w = World::new();
        let a = w.spawn(segment(0.0, 5.0));
        let b = w.spawn(segment(6.0, 5.0));
        w.despawn(a);
        let c = w.spawn(segment(12.0, 5.0));
        assert_eq!((a, b, c), (SegmentId(0), SegmentId(1), SegmentId(2)));
    }

    #[test]
    fn iteration_is_spawn_order() {
        let mut w = World::new();
        for i in 0..10 {
            w.spawn(segment(i as f32 * 6.0, 5.0));
        }
        let xs: Vec<f32> = w.segments().values().map(|s| s.position.x).collect();
        let mut sorted = xs.clone();
        sorted.sort_by(f32::total_cmp);
        assert_eq!(xs, sorted);
    }

    #[test]
    fn step_increments_tick() {
        let mut w = World::new();
        w.step();
        w.step();
        w.step();
        assert_eq!(w.tick(), 3);
    }

    #[test]
    fn drain_events_clears_log() {
        let mut w = World::new();
        w.spawn(segment(0.0, 5.0));
        let events = w.drain_events();
        assert_eq!(events.len(), 1);
        assert!(w.events().is_empty());
    }

    #[test]
    fn replay_equivalence() {
        let mut world = World::new();
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(world.spawn(segment(i as f32 * 6.0, 5.0)));
            world.step();
        }
        for id in ids.iter().take(8) {
            world.despawn(*id);
        }

        let events = world.events().to_vec();
        let replayed = World::replay(&events);

        assert_eq!(world.state_hash(), replayed.state_hash());
        assert_eq!(world.tick(), replayed.tick());
        assert_eq!(world.segment_count(), replayed.segment_count());
    }

    #[test]
    fn replayed_world_continues_id_sequence() {
        let mut world = World::new();
        world.spawn(segment(0.0, 5.0));
        world.spawn(segment(6.0, 5.0));

        let mut replayed = World::replay(world.events());
        assert_eq!(replayed.spawn(segment(12.0, 5.0)), SegmentId(2));
    }
}
