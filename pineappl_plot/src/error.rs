//! Error types of this crate.

use std::path::PathBuf;
use thiserror::Error;

/// Catch-all error for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A metadata key that is needed to label the figure is not present.
    #[error("metadata key `{0}` is missing")]
    MissingMetadata(String),
    /// The dataset does not contain any slices.
    #[error("the dataset does not contain any slices")]
    EmptyDataset,
    /// A panel needs the reference PDF result, but the slice does not have any.
    #[error("the slice does not contain any PDF results")]
    NoPdfResults,
    /// The payload is structurally inconsistent.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    /// The global style was initialized more than once.
    #[error("the global style has already been initialized")]
    StyleAlreadyInitialized,
    /// Reading or writing a file failed.
    #[error("could not access `{path}`")]
    Io {
        /// Path of the file that could not be read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A payload or style file could not be parsed.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    /// A document could not be formatted.
    #[error(transparent)]
    Format(#[from] std::fmt::Error),
    /// The thread pool for rendering slices in parallel could not be created.
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
