use serde::{Deserialize, Serialize};

/// Handle to a live segment in the world.
///
/// Ids are handed out sequentially by the kernel, so ordering by id is
/// ordering by spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u64);

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seg#{}", self.0)
    }
}
