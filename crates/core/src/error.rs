use thiserror::Error;

/// Shared error type used across all tokenview crates.
///
/// Each variant knows the HTTP status it maps to, so the API layer never has
/// to guess.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} environment variable is not set")]
    MissingCredential(&'static str),

    #[error("Failed to fetch token data from Zapper API")]
    UpstreamStatus { status: u16, details: String },

    #[error("GraphQL errors from Zapper API")]
    UpstreamGraphQl(Vec<String>),

    #[error("Token not found")]
    TokenNotFound,

    #[error("{0} did not respond in time")]
    UpstreamTimeout(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] eyre::Error),
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::TokenNotFound => 404,
            Self::UpstreamStatus { status, .. } => *status,
            Self::UpstreamTimeout(_) => 504,
            Self::MissingCredential(_)
            | Self::UpstreamGraphQl(_)
            | Self::Config(_)
            | Self::Other(_) => 500,
        }
    }

    /// Text for the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            Self::Other(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Optional text for the `details` field of the response body.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::UpstreamStatus { details, .. } => Some(details.clone()),
            Self::UpstreamGraphQl(messages) => Some(messages.join("; ")),
            Self::Other(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Caller faults are routine and are not logged as errors.
    ///
    /// A relayed upstream status is never the caller's fault, even a 4xx.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::UpstreamStatus { .. } => false,
            other => (400..500).contains(&other.status_code()),
        }
    }
}
