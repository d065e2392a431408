use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::StreamError;

/// Placement descriptor of a segment variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    /// Distance along the scroll axis the segment occupies, measured from
    /// its placement point.
    pub width: f32,
}

/// An immutable template for a placeable piece of level.
///
/// `prefab` is the payload the host uses to realize the segment. The
/// streaming code never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentVariant {
    pub name: String,
    pub prefab: String,
    #[serde(default)]
    pub descriptor: Option<SegmentDescriptor>,
}

impl SegmentVariant {
    /// Variant with a width descriptor.
    pub fn new(name: impl Into<String>, prefab: impl Into<String>, width: f32) -> Self {
        Self {
            name: name.into(),
            prefab: prefab.into(),
            descriptor: Some(SegmentDescriptor { width }),
        }
    }

    /// Width from the descriptor. There is no fallback width: a missing,
    /// negative or non-finite width is an error.
    pub fn width(&self) -> Result<f32, StreamError> {
        match self.descriptor {
            Some(SegmentDescriptor { width }) if width.is_finite() && width >= 0.0 => Ok(width),
            _ => Err(StreamError::MissingDescriptor {
                variant: self.name.clone(),
            }),
        }
    }
}

/// A variant whose width has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    variant: SegmentVariant,
    width: f32,
}

impl CatalogEntry {
    fn resolve(variant: SegmentVariant) -> Result<Self, StreamError> {
        let width = variant.width()?;
        Ok(Self { variant, width })
    }

    pub fn variant(&self) -> &SegmentVariant {
        &self.variant
    }

    pub fn name(&self) -> &str {
        &self.variant.name
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// The start variant plus the non-empty set of variants drawn from while
/// streaming. Fixed once built.
#[derive(Debug, Clone)]
pub struct SegmentCatalog {
    start: CatalogEntry,
    entries: Vec<CatalogEntry>,
}

impl SegmentCatalog {
    pub fn new(start: SegmentVariant, variants: Vec<SegmentVariant>) -> Result<Self, StreamError> {
        if variants.is_empty() {
            return Err(StreamError::EmptyCatalog);
        }
        let start = CatalogEntry::resolve(start)?;
        let entries = variants
            .into_iter()
            .map(CatalogEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { start, entries })
    }

    pub fn start(&self) -> &CatalogEntry {
        &self.start
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every streamed variant has zero width.
    pub fn all_zero_width(&self) -> bool {
        self.entries.iter().all(|e| e.width == 0.0)
    }

    /// Uniform draw with replacement. Repeats are expected.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &CatalogEntry {
        &self.entries[rng.gen_range(0..self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn empty_catalog_rejected() {
        let err = SegmentCatalog::new(SegmentVariant::new("start", "p/start", 5.0), vec![])
            .unwrap_err();
        assert!(matches!(err, StreamError::EmptyCatalog));
        assert!(err.is_configuration());
    }

    #[test]
    fn missing_descriptor_rejected() {
        let bare = SegmentVariant {
            name: "bare".into(),
            prefab: "p/bare".into(),
            descriptor: None,
        };
        let err = SegmentCatalog::new(SegmentVariant::new("start", "p/start", 5.0), vec![bare])
            .unwrap_err();
        assert!(matches!(err, StreamError::MissingDescriptor { ref variant } if variant == "bare"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn start_descriptor_is_checked_too() {
        let start = SegmentVariant::new("start", "p/start", f32::INFINITY);
        let err = SegmentCatalog::new(start, vec![SegmentVariant::new("a", "p/a", 5.0)])
            .unwrap_err();
        assert!(matches!(err, StreamError::MissingDescriptor { .. }));
    }

    #[test]
    fn negative_width_rejected() {
        assert!(SegmentVariant::new("neg", "p/neg", -1.0).width().is_err());
        assert_eq!(SegmentVariant::new("zero", "p/zero", 0.0).width().unwrap(), 0.0);
    }

    #[test]
    fn pick_covers_every_variant() {
        let catalog = SegmentCatalog::new(
            SegmentVariant::new("start", "p/start", 5.0),
            vec![
                SegmentVariant::new("a", "p/a", 4.0),
                SegmentVariant::new("b", "p/b", 6.0),
                SegmentVariant::new("c", "p/c", 8.0),
            ],
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(catalog.pick(&mut rng).name().to_string());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn single_variant_repeats() {
        let catalog = SegmentCatalog::new(
            SegmentVariant::new("start", "p/start", 5.0),
            vec![SegmentVariant::new("only", "p/only", 5.0)],
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..10 {
            assert_eq!(catalog.pick(&mut rng).name(), "only");
        }
    }
}
