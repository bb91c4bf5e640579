//! DexScreener client: trading pairs and the project links attached to them.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{MarketDataSource, ProviderError, http};

const PROVIDER: &str = "dexscreener";

#[derive(Debug, Default, Deserialize)]
struct TokenPairsResponse {
    pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: String,
    pub url: Option<String>,
    pub info: Option<PairInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairInfo {
    pub websites: Option<Vec<Website>>,
    pub socials: Option<Vec<Social>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Website {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Social {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MarketDataSource for DexScreenerClient {
    async fn fetch_pairs(&self, address: &str) -> Result<Vec<DexPair>, ProviderError> {
        let url = http::join(&self.base_url, &format!("latest/dex/tokens/{address}"));
        let response: TokenPairsResponse = http::send_json(PROVIDER, self.client.get(url)).await?;
        Ok(response.pairs.unwrap_or_default())
    }
}
