use serde::Serialize;
use tokenview_providers::coingecko::CoinGeckoCoin;

use crate::non_empty;

const COIN_PAGE_URL: &str = "https://www.coingecko.com/en/coins";

/// English description and public CoinGecko page for a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoinMetadata {
    pub description: Option<String>,
    pub url: Option<String>,
}

impl CoinMetadata {
    pub fn from_coin(coin: CoinGeckoCoin) -> Self {
        Self {
            description: non_empty(coin.description.and_then(|d| d.en)),
            url: non_empty(coin.id).map(|id| format!("{COIN_PAGE_URL}/{id}")),
        }
    }
}
