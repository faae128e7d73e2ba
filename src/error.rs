//! Error types
//!
//! Each concern gets its own enum. Only `SearchError` ever reaches the UI's
//! shared state; the rest are logged and collapsed or handled locally.

use thiserror::Error;

/// User-facing message shown whenever a search fails, whatever the cause.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Something went wrong while searching. Check that the location is clear, or try again later.";

/// The single failure kind a search can surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{}", SEARCH_FAILED_MESSAGE)]
    SearchFailed,
}

/// Failures of the outbound Gemini call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
}

/// Startup configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("could not read config file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Current-position lookup failures
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("location lookup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("location service returned {0}")]
    Status(u16),

    #[error("location service did not report a position")]
    NoPosition,
}
