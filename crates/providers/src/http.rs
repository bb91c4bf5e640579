use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::ProviderError;

const USER_AGENT: &str = concat!("tokenview/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every provider.
///
/// No client-level timeout: each call is bounded by the aggregator instead.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// Send a request and decode a JSON body, rejecting non-2xx statuses.
pub async fn send_json<T>(provider: &'static str, request: RequestBuilder) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(provider, status = status.as_u16(), "upstream returned non-success status");
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode {
        provider,
        message: e.to_string(),
    })
}

/// Join a base URL and a path without doubling the slash.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::join;

    #[test]
    fn join_handles_slashes() {
        assert_eq!(join("https://a.io/", "/x/y"), "https://a.io/x/y");
        assert_eq!(join("https://a.io", "x"), "https://a.io/x");
    }
}
