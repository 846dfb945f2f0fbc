//! Error types for scene operations.

use crate::components::ComponentId;
use thiserror::Error;

/// Invalid scene configuration. Raised when options are applied, never later.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("zoom bounds must be positive (min = {min}, max = {max})")]
    NonPositiveZoom { min: f64, max: f64 },
    #[error("minimum zoom {min} is greater than maximum zoom {max}")]
    InvertedZoomBounds { min: f64, max: f64 },
    #[error("zoom speed must be a positive finite number, got {0}")]
    InvalidZoomSpeed(f64),
    #[error("padding and tolerances must be non-negative, got {0}")]
    InvalidPadding(f64),
    #[error("could not parse scene options: {0}")]
    Parse(String),
}

/// Scene errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("component {0} is already in the scene")]
    AlreadyMember(ComponentId),
    #[error("component {0} is not in the scene")]
    NotMember(ComponentId),
    #[error("scene already has a background; clear the scene first")]
    BackgroundAlreadySet,
    #[error("scene has no background")]
    NoBackground,
    #[error("failed to load background image: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
