//! Error type shared by configuration, the point store and export.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelerError {
    /// The image list ended up empty after configuration.
    #[error("no images to label")]
    NoImages,

    #[error("invalid scale '{0}': expected a positive number")]
    InvalidScale(String),

    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("unknown option '{0}'")]
    UnknownFlag(String),

    /// A point was appended for an image that was never made current.
    #[error("image '{0}' has no point list")]
    UnknownImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, LabelerError>;
