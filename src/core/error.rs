//! Error types for the patch generator

use thiserror::Error;

/// Main error type for the generator
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Region selection or boundary filtering removed every site.
    ///
    /// Not fatal: callers may skip mesh output for this run.
    #[error("no sites survived region selection and filtering")]
    EmptyRegion,

    #[error("voronoi construction failed: {0}")]
    Voronoi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
