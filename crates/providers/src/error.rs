use thiserror::Error;

/// Failure of a single upstream call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} GraphQL errors: {}", .messages.join("; "))]
    GraphQl {
        provider: &'static str,
        messages: Vec<String>,
    },

    #[error("{provider} JSON-RPC error {code}: {message}")]
    Rpc {
        provider: &'static str,
        code: i64,
        message: String,
    },

    #[error("{0} has no such token")]
    NotFound(&'static str),

    #[error("{0} did not respond in time")]
    Timeout(&'static str),

    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid {provider} payload: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Status { provider, .. }
            | Self::GraphQl { provider, .. }
            | Self::Rpc { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Decode { provider, .. } => *provider,
            Self::NotFound(provider) | Self::Timeout(provider) => *provider,
        }
    }
}
