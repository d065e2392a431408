//! World Kernel: authoritative registry of live level segments.
//!
//! # Invariants
//! - Segments are created and destroyed only through explicit operations.
//! - A placed segment never moves; there is no reposition operation.
//! - Every mutation is recorded in the event log for replay.

pub mod world;

pub use world::{SegmentData, World, WorldEvent};
