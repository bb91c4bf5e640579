//! CoinGecko client: catalog id and description for a contract address.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{BASE_CHAIN_SLUG, MetadataSource, ProviderError, http};

const PROVIDER: &str = "coingecko";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoCoin {
    pub id: Option<String>,
    pub description: Option<Description>,
}

/// Localized descriptions; only English is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Description {
    pub en: Option<String>,
}

pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MetadataSource for CoinGeckoClient {
    async fn fetch_coin(&self, address: &str) -> Result<CoinGeckoCoin, ProviderError> {
        let url = http::join(
            &self.base_url,
            &format!("coins/{BASE_CHAIN_SLUG}/contract/{address}"),
        );
        let request = self.client.get(url).header("Accept", "application/json");
        http::send_json(PROVIDER, request).await
    }
}
