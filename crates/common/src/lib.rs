//! Common: shared handle types and viewport geometry.
//!
//! # Invariants
//! - Positions are world-space X along the scroll axis; the world scrolls
//!   toward +X only.
//! - Viewport half-width is fixed once derived.

mod types;
mod viewport;

pub use types::SegmentId;
pub use viewport::{Viewport, ViewportError};
