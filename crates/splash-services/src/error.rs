//! Todo API error types.

use thiserror::Error;

/// Any failure talking to the todo API.
///
/// Callers are free to treat every variant the same way; the split exists
/// so logs say what actually went wrong.
#[derive(Error, Debug)]
pub enum TodoApiError {
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TodoApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
