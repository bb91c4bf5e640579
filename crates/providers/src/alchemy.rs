//! Alchemy JSON-RPC client used to date a token's deployment.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{ChainRpc, ProviderError, http};

const PROVIDER: &str = "alchemy";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct AssetTransfers {
    #[serde(default)]
    transfers: Vec<AssetTransfer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetTransfer {
    block_num: String,
}

#[derive(Debug, Deserialize)]
struct Block {
    timestamp: Option<String>,
}

pub struct AlchemyClient {
    client: Client,
    base_url: String,
}

impl AlchemyClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The key is part of the URL path, not a header.
    async fn call<T>(
        &self,
        api_key: &str,
        id: u64,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, ProviderError>
    where
        T: DeserializeOwned,
    {
        let url = http::join(&self.base_url, api_key);
        let request = self.client.post(url).json(&RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        });

        let response: RpcResponse<T> = http::send_json(PROVIDER, request).await?;
        if let Some(error) = response.error {
            return Err(ProviderError::Rpc {
                provider: PROVIDER,
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result)
    }
}

#[async_trait]
impl ChainRpc for AlchemyClient {
    async fn first_inbound_transfer_block(
        &self,
        address: &str,
        api_key: &str,
    ) -> Result<Option<String>, ProviderError> {
        let params = json!([{
            "fromBlock": "0x0",
            "toBlock": "latest",
            "toAddress": address,
            "category": ["external"],
            "maxCount": "0x1",
            "order": "asc",
        }]);

        let result: Option<AssetTransfers> = self
            .call(api_key, 1, "alchemy_getAssetTransfers", params)
            .await?;

        Ok(result
            .and_then(|r| r.transfers.into_iter().next())
            .map(|t| t.block_num))
    }

    async fn block_timestamp(
        &self,
        block: &str,
        api_key: &str,
    ) -> Result<Option<u64>, ProviderError> {
        let block: Option<Block> = self
            .call(api_key, 2, "eth_getBlockByNumber", json!([block, false]))
            .await?;

        block
            .and_then(|b| b.timestamp)
            .map(|ts| parse_quantity(&ts))
            .transpose()
    }
}

/// Parse an Ethereum hex quantity such as `0x65a1b2c3`.
pub fn parse_quantity(raw: &str) -> Result<u64, ProviderError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);

    u64::from_str_radix(digits, 16).map_err(|e| ProviderError::Decode {
        provider: PROVIDER,
        message: format!("bad hex quantity {raw:?}: {e}"),
    })
}
