//! Error types for deck generation.
//!
//! One error enum covers the whole pipeline: rendering the background,
//! building slides, writing the package and reading it back.
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for deckforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for deckforge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error tied to a file on disk
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error without a known path (in-memory streams)
    #[error("IO error: {0}")]
    Stream(#[from] std::io::Error),

    /// Image decoding/encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML writing or parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid or unsupported data format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Raster dimensions that cannot be rendered
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A part the package must contain is missing
    #[error("Part not found: {0}")]
    PartNotFound(String),
}

impl Error {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
