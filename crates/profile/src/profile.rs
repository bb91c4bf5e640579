use serde::Serialize;
use tokenview_providers::zapper::{PriceData, ZapperToken};

use crate::{CoinMetadata, CreatorInfo, MarketLinks, RelevantHolder, TokenAge};

/// The merged token view returned to callers.
///
/// Every optional field serializes as `null` when its source was
/// unavailable; nothing is skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenProfile {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub image_url_v2: Option<String>,
    pub creator: CreatorInfo,
    pub relevant_holders: Option<Vec<RelevantHolder>>,
    pub holder_count: Option<u64>,
    pub age: Option<TokenAge>,
    pub price_data: Option<PriceData>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub telegram: Option<String>,
    pub twitter: Option<String>,
    pub dexscreener_url: Option<String>,
    pub coin_gecko_url: Option<String>,
}

impl TokenProfile {
    /// Merge the resolved pieces. Cannot fail.
    pub fn assemble(
        token: ZapperToken,
        creator: CreatorInfo,
        relevant_holders: Option<Vec<RelevantHolder>>,
        age: Option<TokenAge>,
        market: Option<MarketLinks>,
        metadata: Option<CoinMetadata>,
    ) -> Self {
        let market = market.unwrap_or_default();
        let metadata = metadata.unwrap_or_default();

        Self {
            address: token.address,
            symbol: token.symbol,
            name: token.name,
            decimals: token.decimals,
            image_url_v2: token.image_url_v2,
            creator,
            relevant_holders,
            holder_count: token.holders.and_then(|h| h.total_count),
            age,
            price_data: token.price_data,
            description: metadata.description,
            website: market.website,
            telegram: market.telegram,
            twitter: market.twitter,
            dexscreener_url: market.dexscreener_url,
            coin_gecko_url: metadata.url,
        }
    }
}
