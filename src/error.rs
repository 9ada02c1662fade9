//! Error types for the Nominatim geocoding client

use std::fmt;

/// Errors from geocoder construction and lookups
#[derive(Debug)]
pub enum GeocoderError {
    /// Rejected at construction time; the caller must fix its configuration
    InvalidConfiguration(String),
    /// Network-level failure: DNS, connection, or timeout
    Transport(Box<reqwest::Error>),
    /// The service answered with a non-success HTTP status
    RequestFailed(u16),
    /// The response body was not valid JSON or did not match the expected shape
    Decode(String),
    /// A well-formed response with no match for the query
    NoResults,
}

impl fmt::Display for GeocoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::Transport(e) => write!(f, "Transport error: {e}"),
            Self::RequestFailed(status) => write!(f, "Request failed with status {status}"),
            Self::Decode(msg) => write!(f, "Decode error: {msg}"),
            Self::NoResults => write!(f, "No results found"),
        }
    }
}

impl std::error::Error for GeocoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeocoderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<serde_json::Error> for GeocoderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeocoderError>;
