/*!
 * Error types for the seekthumbs library.
 *
 * Each component gets its own error enum so callers can match on the
 * failure kind; `AppError` wraps them for the command line layer.
 * All types are defined with the thiserror crate.
 */

use thiserror::Error;

/// Errors that can occur while parsing cue text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CueError {
    /// A timing line matched but one of its timestamps could not be decoded
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),
}

/// Errors that can occur while building a thumbnail index
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailError {
    /// Cue text is not an absolute URL (direct mode)
    #[error("Invalid thumbnail locator '{text}': {source}")]
    InvalidLocator {
        /// The offending cue text
        text: String,
        /// Parser failure reported by the url crate
        #[source]
        source: url::ParseError,
    },

    /// The configured sprite base URL is not an absolute URL (legacy sprite mode)
    #[error("Invalid sprite base URL '{url}': {source}")]
    InvalidSpriteBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from cue parsing
    #[error("Cue error: {0}")]
    Cue(#[from] CueError),

    /// Error from index construction
    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
