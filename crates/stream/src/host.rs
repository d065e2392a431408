use glam::Vec3;
use scrollworld_common::SegmentId;
use scrollworld_kernel::{SegmentData, World};

use crate::catalog::SegmentVariant;

/// Creates and destroys live segments on behalf of the stream.
///
/// The stream calls `instantiate` when it places a segment and a segment's
/// lifetime calls `destroy` once, when it retires.
pub trait SegmentHost {
    fn instantiate(&mut self, variant: &SegmentVariant, position: Vec3, width: f32) -> SegmentId;
    fn destroy(&mut self, id: SegmentId);
}

impl SegmentHost for World {
    fn instantiate(&mut self, variant: &SegmentVariant, position: Vec3, width: f32) -> SegmentId {
        self.spawn(SegmentData {
            variant: variant.name.clone(),
            prefab: variant.prefab.clone(),
            position,
            width,
        })
    }

    fn destroy(&mut self, id: SegmentId) {
        self.despawn(id);
    }
}
