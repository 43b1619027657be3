//! Builder methods for creating errors with context

use super::types::{BoxError, Error};
use std::path::PathBuf;

impl Error {
    /// Create a construction error for the named resource
    #[must_use]
    pub fn construction(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Construction {
            resource: resource.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a construction error with an underlying cause
    #[must_use]
    pub fn construction_with_source(
        resource: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::Construction {
            resource: resource.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a body error
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Error::Body {
            message: message.into(),
            source: None,
        }
    }

    /// Create a body error with an underlying cause
    #[must_use]
    pub fn body_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Body {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a release error for the named resource
    #[must_use]
    pub fn release(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Release {
            resource: resource.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a release error with an underlying cause
    #[must_use]
    pub fn release_with_source(
        resource: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::Release {
            resource: resource.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an error for a slot that cannot be handed to the body
    #[must_use]
    pub fn resource_unavailable(index: usize, message: impl Into<String>) -> Self {
        Error::ResourceUnavailable {
            index,
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Wrap this error with a context message
    #[must_use]
    pub fn context(self, message: impl Into<String>) -> Self {
        Error::Context {
            message: message.into(),
            source: Box::new(self),
        }
    }
}
