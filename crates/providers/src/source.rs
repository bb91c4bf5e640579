//! Collaborator traits, one per upstream concern.
//!
//! The HTTP clients in this crate implement them; tests substitute
//! in-memory fakes.

use async_trait::async_trait;

use crate::ProviderError;
use crate::coingecko::CoinGeckoCoin;
use crate::dexscreener::DexPair;
use crate::neynar::NeynarUser;
use crate::zapper::ZapperToken;

/// Token identity, price and deployer data (Zapper).
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    async fn fetch_token(
        &self,
        address: &str,
        chain_id: u64,
        api_key: &str,
    ) -> Result<ZapperToken, ProviderError>;
}

/// DEX trading pairs listing the token (DexScreener).
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_pairs(&self, address: &str) -> Result<Vec<DexPair>, ProviderError>;
}

/// Coin catalog entry with description (CoinGecko).
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_coin(&self, address: &str) -> Result<CoinGeckoCoin, ProviderError>;
}

/// Farcaster social graph (Neynar).
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Holders of `address` that are relevant to `viewer_fid`, most relevant first.
    async fn relevant_owners(
        &self,
        address: &str,
        viewer_fid: &str,
        api_key: &str,
    ) -> Result<Vec<NeynarUser>, ProviderError>;

    /// Farcaster users that verified or custody `address`.
    async fn users_by_address(
        &self,
        address: &str,
        api_key: &str,
    ) -> Result<Vec<NeynarUser>, ProviderError>;
}

/// Chain RPC used to date the token's deployment (Alchemy).
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Block number (hex quantity) of the earliest external transfer into `address`.
    async fn first_inbound_transfer_block(
        &self,
        address: &str,
        api_key: &str,
    ) -> Result<Option<String>, ProviderError>;

    /// Unix timestamp in seconds of `block`.
    async fn block_timestamp(&self, block: &str, api_key: &str)
    -> Result<Option<u64>, ProviderError>;
}
