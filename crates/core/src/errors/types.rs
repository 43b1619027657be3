//! Core error type definitions

use std::path::PathBuf;

/// Boxed error used as an optional cause on the lifecycle variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for tryscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tryscope operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resource factory failed to produce its resource
    #[error("failed to construct resource '{resource}': {message}")]
    Construction {
        resource: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The protected body of a block failed
    #[error("scoped body failed: {message}")]
    Body {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A resource failed while being released
    #[error("failed to release resource '{resource}': {message}")]
    Release {
        resource: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A body asked for a slot that is absent or of another type
    #[error("resource slot {index} unavailable: {message}")]
    ResourceUnavailable { index: usize, message: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// An error annotated with caller context
    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}
