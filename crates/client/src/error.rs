use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong talking to the detection backend.
///
/// Transport failures, non-2xx statuses, and local file I/O keep their
/// detail here; the controller collapses them into one user-facing line
/// per action.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid backend address {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    Init(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
