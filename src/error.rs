// SPDX-License-Identifier: MPL-2.0
use crate::domain::media::MediaKind;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Media Error: {0}")]
    Media(#[from] MediaError),
    #[error("Video Error: {0}")]
    Video(#[from] VideoError),
    #[error("Fetch Error: {0}")]
    Fetch(String),
}

/// Host contract violations detected when a viewer session is opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The host passed an empty media list.
    #[error("media sequence is empty")]
    EmptySequence,

    /// The starting index does not address an item of the sequence.
    #[error("index {index} is out of bounds for {len} items")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An item of the wrong kind was found in the sequence.
    #[error("item {index} is not a {expected}")]
    MixedSequence { expected: MediaKind, index: usize },
}

/// Specific error types for video playback issues.
/// Used to decide how the session degrades and what gets logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoError {
    /// The source could not be fetched (offline, DNS, HTTP failure).
    #[error("Network error: {0}")]
    Network(String),

    /// The container or codec is not supported by the platform.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// The stream was fetched but could not be decoded.
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),

    /// Loading was aborted before any data arrived.
    #[error("Loading aborted")]
    Aborted,

    /// Generic error with raw message
    #[error("{0}")]
    Other(String),
}

impl VideoError {
    /// Short label the view shows for this failure.
    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            VideoError::Network(_) => "Check your connection",
            VideoError::UnsupportedSource(_) => "Format not supported",
            VideoError::DecodingFailed(_) => "The clip appears to be damaged",
            VideoError::Aborted => "Loading was interrupted",
            VideoError::Other(_) => "Something went wrong",
        }
    }

    /// Attempts to parse a raw platform error message into a specific `VideoError`.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("aborted") || msg_lower.contains("media_err_aborted") {
            return VideoError::Aborted;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("timed out")
            || msg_lower.contains("connection")
            || msg_lower.contains("http")
        {
            return VideoError::Network(msg.to_string());
        }

        if msg_lower.contains("not supported")
            || msg_lower.contains("unsupported")
            || msg_lower.contains("src_not_supported")
            || msg_lower.contains("no supported source")
        {
            return VideoError::UnsupportedSource(msg.to_string());
        }

        if msg_lower.contains("decode")
            || msg_lower.contains("corrupt")
            || msg_lower.contains("malformed")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
