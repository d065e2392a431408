use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::{SegmentCatalog, SegmentVariant};
use crate::error::StreamError;

/// Level streaming configuration. Set once when a level starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Variant placed first, at `start_position`.
    pub start: SegmentVariant,
    /// Placement point of the start segment. Y and Z carry over to every
    /// segment placed after it.
    #[serde(default)]
    pub start_position: Vec3,
    /// Visible gap between two consecutive segments.
    #[serde(default)]
    pub gap: f32,
    /// Variants drawn from while streaming.
    pub catalog: Vec<SegmentVariant>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            start: SegmentVariant::new("start", "segments/start", 20.0),
            start_position: Vec3::ZERO,
            gap: 1.0,
            catalog: vec![
                SegmentVariant::new("flat", "segments/flat", 12.0),
                SegmentVariant::new("pit", "segments/pit", 16.0),
                SegmentVariant::new("stairs", "segments/stairs", 10.0),
            ],
        }
    }
}

impl StreamConfig {
    /// Parse a config from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, StreamError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Check the config and resolve every variant's width.
    pub fn validate(&self) -> Result<SegmentCatalog, StreamError> {
        let catalog = SegmentCatalog::new(self.start.clone(), self.catalog.clone())?;
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(StreamError::InvalidGap(self.gap));
        }
        if !self.start_position.is_finite() {
            return Err(StreamError::InvalidStartPosition(self.start_position));
        }
        // Each draw must move the frontier, or pre-fill never terminates.
        if self.gap == 0.0 && catalog.all_zero_width() {
            return Err(StreamError::Stalled(self.start_position.x));
        }
        Ok(catalog)
    }
}
