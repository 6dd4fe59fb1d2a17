use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to one of the hosted services.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Failures reading or writing the persisted index directory.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index file {path} is malformed: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("chunk {position} has {found} dimensions, index declares {expected}")]
    Dimension {
        position: usize,
        expected: usize,
        found: usize,
    },

    #[error("chunk {position} has a vector value that is not a finite number")]
    NonFinite { position: usize },
}

#[derive(Debug, Error)]
pub enum RagError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("{0} returned no content")]
    EmptyResponse(&'static str),

    #[error("embedding service returned {0}")]
    Embedding(String),
}
