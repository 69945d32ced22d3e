use thiserror::Error;

/// Shown when the backend could not be reached at all.
pub const CONNECTION_ERROR: &str = "Unable to reach the server. Check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the backend's `detail`, if it sent one.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),

    #[error("Please sign in to continue")]
    Unauthenticated,

    #[error("Download failed: {0}")]
    Download(String),
}

impl AppError {
    /// Text to render inline for this failure.
    ///
    /// The backend's own message wins when present; otherwise each variant
    /// falls back to something the user can act on, using `fallback` for
    /// failures that carry nothing worth showing.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            AppError::Network(_) => CONNECTION_ERROR.to_string(),
            AppError::Validation(message) => message.clone(),
            AppError::Unauthenticated => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}
