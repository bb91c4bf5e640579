//! HTTP clients for the upstream data providers and the traits the
//! aggregation layer talks to them through.

pub mod alchemy;
pub mod coingecko;
pub mod de;
pub mod dexscreener;
pub mod error;
pub mod http;
pub mod neynar;
pub mod source;
pub mod zapper;

pub use error::ProviderError;
pub use source::{ChainRpc, MarketDataSource, MetadataSource, SocialGraph, TokenDataSource};

/// Base mainnet, the only chain this service serves.
pub const BASE_CHAIN_ID: u64 = 8453;

/// Chain slug used by DexScreener, Neynar and CoinGecko for Base.
pub const BASE_CHAIN_SLUG: &str = "base";
