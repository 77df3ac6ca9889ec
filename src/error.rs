use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by this crate.
///
/// This type covers input validation (unusable Imgur URLs, missing credential), HTTP
/// status classification, conversion errors from loosely-typed API responses, and
/// underlying I/O / HTTP client errors.
///
/// Notes:
/// - Network/transport failures (including timeouts, if one was configured) are
///   returned as [`ImgurError::Http`].
/// - The album payload wraps its fields in optional containers; missing required
///   fields are reported as [`ImgurError::MissingField`].
#[derive(Debug, Error)]
pub enum ImgurError {
    /// The input could not be resolved to an album or image identifier.
    #[error("invalid Imgur URL: {0}")]
    InvalidInput(String),
    /// No client ID was supplied via flag or environment.
    #[error("no client ID provided; set IMGUR_CLIENT_ID or pass --client-id")]
    MissingClientId,
    /// An invalid URL was composed or returned.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The server returned `401 Unauthorized` or `403 Forbidden` (typically a bad
    /// client ID).
    #[error("authentication failed with status {0}")]
    AuthenticationFailed(StatusCode),
    /// A request completed but returned a non-success HTTP status (other than
    /// `401`/`403`).
    #[error("request failed with status {0}")]
    RequestFailed(StatusCode),
    /// A required field was missing in an API response body.
    #[error("{0}")]
    MissingField(&'static str),
    /// The response body was not valid JSON for the expected shape.
    #[error("failed to decode Imgur API response: {0}")]
    Decode(#[from] serde_json::Error),
    /// An image entry carried a link that does not parse as a fetchable URL.
    #[error("invalid image link: {0}")]
    InvalidImageLink(String),
    /// Writing downloaded bytes to disk failed.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite { path: PathBuf, source: io::Error },
    /// An underlying HTTP client operation failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
