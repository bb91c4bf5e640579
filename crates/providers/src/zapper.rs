//! Zapper GraphQL client: token identity, deployer and price data.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::de::string_or_number;
use crate::{ProviderError, TokenDataSource, http};

const PROVIDER: &str = "zapper";

pub const FUNGIBLE_TOKEN_QUERY: &str = r#"
  query FungibleTokenV2($address: Address!, $chainId: Int!) {
    fungibleTokenV2(address: $address, chainId: $chainId) {
      address
      symbol
      name
      decimals
      imageUrlV2
      deployer {
        address
        farcasterProfile {
          username
          fid
          metadata {
            imageUrl
          }
        }
      }
      holders(first: 1) {
        totalCount
      }
      priceData {
        price
        marketCap
        priceChange5m
        priceChange1h
        priceChange24h
        volume24h
        totalGasTokenLiquidity
        totalLiquidity
        priceTicks(currency: USD, timeFrame: HOUR) {
          id
          median
          open
          close
          high
          low
          timestamp
        }
      }
    }
  }
"#;

// ─── Wire Types ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FungibleTokenData {
    fungible_token_v2: Option<ZapperToken>,
}

/// A fungible token as Zapper describes it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapperToken {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub image_url_v2: Option<String>,
    pub deployer: Option<Deployer>,
    pub holders: Option<HolderConnection>,
    pub price_data: Option<PriceData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployer {
    pub address: Option<String>,
    pub farcaster_profile: Option<FarcasterProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FarcasterProfile {
    pub username: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub fid: Option<String>,
    pub metadata: Option<ProfileMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderConnection {
    pub total_count: Option<u64>,
}

/// Market statistics, passed through to callers unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceData {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub price_change_5m: Option<f64>,
    pub price_change_1h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub total_gas_token_liquidity: Option<f64>,
    pub total_liquidity: Option<f64>,
    #[serde(default)]
    pub price_ticks: Vec<PriceTick>,
}

/// One hourly USD candle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub id: String,
    pub median: f64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub timestamp: i64,
}

// ─── Client ─────────────────────────────────────────────────────────────────

pub struct ZapperClient {
    client: Client,
    url: String,
}

impl ZapperClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TokenDataSource for ZapperClient {
    async fn fetch_token(
        &self,
        address: &str,
        chain_id: u64,
        api_key: &str,
    ) -> Result<ZapperToken, ProviderError> {
        let request = self
            .client
            .post(&self.url)
            .header("x-zapper-api-key", api_key)
            .json(&json!({
                "query": FUNGIBLE_TOKEN_QUERY,
                "variables": { "address": address, "chainId": chain_id },
            }));

        let response: GraphQlResponse<FungibleTokenData> = http::send_json(PROVIDER, request).await?;
        token_from_response(response)
    }
}

/// GraphQL errors win over any partial data; a null token is "not found".
fn token_from_response(
    response: GraphQlResponse<FungibleTokenData>,
) -> Result<ZapperToken, ProviderError> {
    if let Some(errors) = response.errors {
        return Err(ProviderError::GraphQl {
            provider: PROVIDER,
            messages: errors.into_iter().map(|e| e.message).collect(),
        });
    }

    response
        .data
        .and_then(|d| d.fungible_token_v2)
        .ok_or(ProviderError::NotFound(PROVIDER))
}
