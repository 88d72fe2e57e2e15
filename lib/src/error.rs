use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, convolving or preparing an image for display
#[derive(Debug, Error)]
pub enum ConvolveError {
    #[error("invalid kernel shape: {0}")]
    InvalidKernelShape(String),

    #[error("cannot read image {}: {source}", .path.display())]
    InvalidImagePath {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("expected a 2D or 3D image array, got rank {rank}")]
    InvalidShape { rank: usize },

    #[error("display unavailable: {0}")]
    DisplayUnavailable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("result of shape {shape:?} has no pixels to display")]
    EmptyResult { shape: Vec<usize> },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, ConvolveError>;
