use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from deriving viewport geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspect(f32),
    #[error("orthographic size must be finite and positive, got {0}")]
    InvalidOrthoSize(f32),
    #[error("half-width must be finite and non-negative, got {0}")]
    InvalidHalfWidth(f32),
    #[error("center must be finite, got {0}")]
    InvalidCenter(f32),
}

/// The visible window over the 1D world: a center on the scroll axis and a
/// fixed half-width.
///
/// The camera owner moves the center once per frame before any streaming
/// tick runs. Streaming code only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    center: f32,
    half_width: f32,
}

impl Viewport {
    /// Viewport with an explicit half-width.
    pub fn new(center: f32, half_width: f32) -> Result<Self, ViewportError> {
        if !center.is_finite() {
            return Err(ViewportError::InvalidCenter(center));
        }
        if !half_width.is_finite() || half_width < 0.0 {
            return Err(ViewportError::InvalidHalfWidth(half_width));
        }
        Ok(Self { center, half_width })
    }

    /// Viewport of an orthographic camera.
    ///
    /// `ortho_size` is half the visible height, so the visible width is
    /// `2 * ortho_size * aspect` and the half-width is `ortho_size * aspect`.
    pub fn orthographic(center: f32, aspect: f32, ortho_size: f32) -> Result<Self, ViewportError> {
        if !center.is_finite() {
            return Err(ViewportError::InvalidCenter(center));
        }
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ViewportError::InvalidAspect(aspect));
        }
        if !ortho_size.is_finite() || ortho_size <= 0.0 {
            return Err(ViewportError::InvalidOrthoSize(ortho_size));
        }
        Ok(Self {
            center,
            half_width: ortho_size * aspect,
        })
    }

    /// Orthographic viewport centered on a camera position. Only X is used.
    pub fn from_camera(
        position: Vec3,
        aspect: f32,
        ortho_size: f32,
    ) -> Result<Self, ViewportError> {
        Self::orthographic(position.x, aspect, ortho_size)
    }

    pub fn center(&self) -> f32 {
        self.center
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Edge the world scrolls in from (`center + half_width`).
    pub fn far_edge(&self) -> f32 {
        self.center + self.half_width
    }

    /// Edge the world scrolls out through (`center - half_width`).
    pub fn trailing_edge(&self) -> f32 {
        self.center - self.half_width
    }

    /// Move the center along the scroll axis.
    pub fn scroll(&mut self, dx: f32) {
        self.center += dx;
    }

    /// Place the center at an absolute position.
    pub fn set_center(&mut self, center: f32) {
        self.center = center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthographic_half_width() {
        // 16:9 at ortho size 5 => 10 units tall, 17.78 wide.
        let vp = Viewport::orthographic(0.0, 16.0 / 9.0, 5.0).unwrap();
        assert!((vp.half_width() - 8.888_889).abs() < 1e-4);
    }

    #[test]
    fn edges_follow_center() {
        let mut vp = Viewport::new(0.0, 10.0).unwrap();
        assert_eq!(vp.far_edge(), 10.0);
        assert_eq!(vp.trailing_edge(), -10.0);

        vp.scroll(50.0);
        assert_eq!(vp.far_edge(), 60.0);
        assert_eq!(vp.trailing_edge(), 40.0);
    }

    #[test]
    fn from_camera_reads_x_only() {
        let vp = Viewport::from_camera(Vec3::new(3.0, 7.0, -10.0), 2.0, 1.0).unwrap();
        assert_eq!(vp.center(), 3.0);
        assert_eq!(vp.half_width(), 2.0);
    }

    #[test]
    fn rejects_degenerate_projection() {
        assert_eq!(
            Viewport::orthographic(0.0, 0.0, 5.0),
            Err(ViewportError::InvalidAspect(0.0))
        );
        assert_eq!(
            Viewport::orthographic(0.0, 1.5, -1.0),
            Err(ViewportError::InvalidOrthoSize(-1.0))
        );
        assert!(Viewport::new(0.0, f32::NAN).is_err());
        assert_eq!(
            Viewport::new(f32::INFINITY, 10.0),
            Err(ViewportError::InvalidCenter(f32::INFINITY))
        );
        assert!(matches!(
            Viewport::orthographic(f32::NAN, 1.5, 5.0),
            Err(ViewportError::InvalidCenter(_))
        ));
    }
}
