use glam::Vec3;
use scrollworld_common::ViewportError;

/// Errors from building or starting a segment stream.
///
/// Everything here is a programming or configuration error. Nothing is
/// retried; steady-state ticking never produces an error.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("segment catalog is empty")]
    EmptyCatalog,
    #[error("segment gap must be finite and non-negative, got {0}")]
    InvalidGap(f32),
    #[error("start position must be finite, got {0}")]
    InvalidStartPosition(Vec3),
    #[error("stream cannot advance: spawning does not move the frontier past {0}")]
    Stalled(f32),
    #[error("variant `{variant}` has no valid width descriptor")]
    MissingDescriptor { variant: String },
    #[error("invalid viewport: {0}")]
    InvalidViewport(#[from] ViewportError),
    #[error("stream is already initialized")]
    AlreadyInitialized,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl StreamError {
    /// Whether this error comes from an invalid level configuration, as
    /// opposed to a missing descriptor, bad viewport, or IO failure.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StreamError::EmptyCatalog
                | StreamError::InvalidGap(_)
                | StreamError::InvalidStartPosition(_)
                | StreamError::Stalled(_)
        )
    }
}
