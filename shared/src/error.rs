use thiserror::Error;

/// Message shown when the server could not be reached at all
pub const NETWORK_ERROR_MESSAGE: &str = "Unable to connect to the server (Network Error)";

/// The single error channel of the API client.
///
/// Bodies that are not JSON never get their own variant: their text ends up
/// in the message of [`ApiError::Http`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused connection, timeout).
    /// The transport's own error is logged, never shown.
    #[error("{msg}", msg = NETWORK_ERROR_MESSAGE)]
    Network,

    /// Non-2xx response. `message` is what the user sees.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A successful response did not have the expected shape
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
