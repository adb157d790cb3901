//! Error types shared by the identifier converter, update gate and API client

use serde::Serialize;
use thiserror::Error;

/// Detail string reported when the Steam servers cannot be reached
pub const API_CONNECTION_ERROR: &str = "api_conn_err";
/// Detail string reported when a Steam response cannot be parsed
pub const API_DATA_ERROR: &str = "api_data_err";
/// Detail string reported for missing or non-numeric identifiers
pub const EMPTY_OR_NAN: &str = "Parameter was empty or NaN";

#[derive(Error, Debug)]
pub enum SteamError {
    /// A required input was missing, or not numeric where a number is required.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The request never produced a response body (connect failure, timeout, reset).
    #[error("Failed to reach the Steam API: {source}")]
    ConnectionError {
        #[source]
        source: reqwest::Error,
    },
    /// The upstream answered, but not with a JSON object/array or an XML document.
    #[error("Steam API returned unusable data: {0}")]
    DataError(String),
    /// The identifier is well formed but has no counterpart in the requested format.
    #[error("Conversion unavailable: {0}")]
    ConversionUnavailable(String),
    /// The cache collaborator backing the update gate failed.
    #[error(transparent)]
    CacheUnavailable(#[from] crate::cache::CacheError),
}

/// Uniform error shape handed to web clients: `{"type": "error", "data": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: String,
}

impl SteamError {
    pub(crate) fn empty_or_nan() -> Self {
        SteamError::InvalidArgument(EMPTY_OR_NAN.to_string())
    }

    /// Machine-readable detail callers branch on
    pub fn detail(&self) -> String {
        match self {
            SteamError::InvalidArgument(msg) | SteamError::ConversionUnavailable(msg) => {
                msg.clone()
            }
            SteamError::ConnectionError { .. } => API_CONNECTION_ERROR.to_string(),
            SteamError::DataError(_) => API_DATA_ERROR.to_string(),
            SteamError::CacheUnavailable(e) => e.to_string(),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: "error",
            data: self.detail(),
        }
    }
}
