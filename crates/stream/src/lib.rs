//! Streaming: infinite side-scroller level segments.
//!
//! # Invariants
//! - Consecutive segments satisfy `next.x == prev.x + prev.width + gap`.
//! - The frontier never moves backwards.
//! - At most one segment spawns per tick.
//! - A segment is retired once, only after the viewport's trailing edge is
//!   more than the segment's own width past its placement point.
//!
//! Spawning ([`SegmentStream`]) and retirement ([`SegmentLifetime`]) never
//! read each other's state. [`LevelStreamer`] runs both once per tick.

mod catalog;
mod config;
mod error;
mod frontier;
mod host;
mod level;
mod lifetime;

pub use catalog::{CatalogEntry, SegmentCatalog, SegmentDescriptor, SegmentVariant};
pub use config::StreamConfig;
pub use error::StreamError;
pub use frontier::{SegmentStream, SpawnedSegment};
pub use host::SegmentHost;
pub use level::{LevelStreamer, StreamStats, TickReport};
pub use lifetime::{LifetimeRegistry, SegmentLifetime};

pub fn crate_info() -> &'static str {
    "scrollworld-stream v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("stream"));
    }
}
