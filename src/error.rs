//! Error types for imagery fetching.

use thiserror::Error;

/// Coarse classification of an [`ImageryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported, disallowed or under-configured provider.
    Config,
    /// The provider cannot perform the requested operation.
    Capability,
    /// Transport failure or non-success HTTP status.
    Network,
    /// A success status carrying something that is not a usable image.
    Data,
}

/// Errors produced while resolving providers and fetching imagery.
#[derive(Error, Debug)]
pub enum ImageryError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{provider} does not support {operation}; {hint}")]
    Capability {
        provider: &'static str,
        operation: &'static str,
        hint: &'static str,
    },

    #[error("request failed ({status}): {url}")]
    Network { status: u16, url: String },

    #[error("non-image response from {url} (content-type: {content_type:?}): {snippet}")]
    NotAnImage {
        url: String,
        content_type: Option<String>,
        snippet: String,
    },

    #[error("failed to decode image from {url}: {source} (body starts with: {snippet})")]
    Decode {
        url: String,
        snippet: String,
        #[source]
        source: image::ImageError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ImageryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageryError::Config(_) => ErrorKind::Config,
            ImageryError::Capability { .. } => ErrorKind::Capability,
            ImageryError::Network { .. } | ImageryError::Http(_) => ErrorKind::Network,
            ImageryError::NotAnImage { .. } | ImageryError::Decode { .. } => ErrorKind::Data,
        }
    }
}

/// Result alias for imagery operations.
pub type Result<T> = std::result::Result<T, ImageryError>;

/// First `max_chars` characters of a response body, decoded lossily.
pub(crate) fn body_snippet(body: &[u8], max_chars: usize) -> String {
    String::from_utf8_lossy(body).chars().take(max_chars).collect()
}
