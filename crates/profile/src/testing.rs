//! In-memory upstreams for tests. Every call is recorded with its arguments.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokenview_providers::coingecko::CoinGeckoCoin;
use tokenview_providers::dexscreener::DexPair;
use tokenview_providers::neynar::NeynarUser;
use tokenview_providers::zapper::{Deployer, FarcasterProfile, HolderConnection, ZapperToken};
use tokenview_providers::{
    ChainRpc, MarketDataSource, MetadataSource, ProviderError, SocialGraph, TokenDataSource,
};

use crate::Providers;

/// What the fake Zapper answers.
#[derive(Debug, Clone, Default)]
pub enum TokenReply {
    Found(ZapperToken),
    Status(u16, String),
    GraphQl(Vec<String>),
    #[default]
    NotFound,
    /// Never answers.
    Hang,
}

/// Arguments of every call made to one fake method, in call order.
#[derive(Debug, Default)]
pub struct Recorder(Mutex<Vec<Vec<String>>>);

impl Recorder {
    fn record(&self, args: &[&str]) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args.iter().map(|a| a.to_string()).collect());
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn args(&self) -> Vec<Vec<String>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub tokens: Recorder,
    pub pairs: Recorder,
    pub coins: Recorder,
    pub relevant_owners: Recorder,
    pub users_by_address: Recorder,
    pub transfers: Recorder,
    pub blocks: Recorder,
}

impl Calls {
    pub fn total(&self) -> usize {
        [
            &self.tokens,
            &self.pairs,
            &self.coins,
            &self.relevant_owners,
            &self.users_by_address,
            &self.transfers,
            &self.blocks,
        ]
        .iter()
        .map(|r| r.count())
        .sum()
    }
}

/// Canned upstream answers. `None` on an optional source means HTTP 500.
#[derive(Debug, Default)]
pub struct FakeUpstreams {
    pub token: TokenReply,
    pub pairs: Option<Vec<DexPair>>,
    pub coin: Option<CoinGeckoCoin>,
    pub owners: Option<Vec<NeynarUser>>,
    pub users_by_address: Option<Vec<NeynarUser>>,
    /// `None` means no inbound transfer was found.
    pub transfer_block: Option<String>,
    pub block_timestamp: Option<u64>,
    /// Makes every Neynar call hang.
    pub social_hangs: bool,
    /// Delay added to each Alchemy call.
    pub chain_delay: Option<Duration>,
    pub calls: Calls,
}

impl FakeUpstreams {
    pub fn providers(self: Arc<Self>) -> Providers {
        Providers {
            tokens: self.clone(),
            markets: self.clone(),
            metadata: self.clone(),
            social: self.clone(),
            chain: self,
        }
    }

    pub fn count(&self, method: impl Fn(&Calls) -> &Recorder) -> usize {
        method(&self.calls).count()
    }

    pub fn args(&self, method: impl Fn(&Calls) -> &Recorder) -> Vec<Vec<String>> {
        method(&self.calls).args()
    }

    async fn chain_latency(&self) {
        if let Some(delay) = self.chain_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

/// A token whose deployer has the given embedded Farcaster username.
pub fn token_with_deployer(address: &str, deployer: &str, username: Option<&str>) -> ZapperToken {
    ZapperToken {
        address: address.into(),
        symbol: "TOK".into(),
        name: "Token".into(),
        decimals: 18,
        image_url_v2: Some("https://img/tok.png".into()),
        deployer: Some(Deployer {
            address: Some(deployer.into()),
            farcaster_profile: Some(FarcasterProfile {
                username: username.map(String::from),
                fid: username.map(|_| "1".to_string()),
                metadata: None,
            }),
        }),
        holders: Some(HolderConnection {
            total_count: Some(1234),
        }),
        price_data: None,
    }
}

fn server_error(provider: &'static str) -> ProviderError {
    ProviderError::Status {
        provider,
        status: 500,
        body: "fake outage".into(),
    }
}

#[async_trait]
impl TokenDataSource for FakeUpstreams {
    async fn fetch_token(
        &self,
        address: &str,
        chain_id: u64,
        api_key: &str,
    ) -> Result<ZapperToken, ProviderError> {
        let chain_id = chain_id.to_string();
        self.calls.tokens.record(&[address, chain_id.as_str(), api_key]);
        match &self.token {
            TokenReply::Found(token) => Ok(token.clone()),
            TokenReply::Status(status, body) => Err(ProviderError::Status {
                provider: "zapper",
                status: *status,
                body: body.clone(),
            }),
            TokenReply::GraphQl(messages) => Err(ProviderError::GraphQl {
                provider: "zapper",
                messages: messages.clone(),
            }),
            TokenReply::NotFound => Err(ProviderError::NotFound("zapper")),
            TokenReply::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl MarketDataSource for FakeUpstreams {
    async fn fetch_pairs(&self, address: &str) -> Result<Vec<DexPair>, ProviderError> {
        self.calls.pairs.record(&[address]);
        self.pairs.clone().ok_or_else(|| server_error("dexscreener"))
    }
}

#[async_trait]
impl MetadataSource for FakeUpstreams {
    async fn fetch_coin(&self, address: &str) -> Result<CoinGeckoCoin, ProviderError> {
        self.calls.coins.record(&[address]);
        self.coin.clone().ok_or_else(|| server_error("coingecko"))
    }
}

#[async_trait]
impl SocialGraph for FakeUpstreams {
    async fn relevant_owners(
        &self,
        address: &str,
        viewer_fid: &str,
        api_key: &str,
    ) -> Result<Vec<NeynarUser>, ProviderError> {
        self.calls
            .relevant_owners
            .record(&[address, viewer_fid, api_key]);
        if self.social_hangs {
            return std::future::pending().await;
        }
        self.owners.clone().ok_or_else(|| server_error("neynar"))
    }

    async fn users_by_address(
        &self,
        address: &str,
        api_key: &str,
    ) -> Result<Vec<NeynarUser>, ProviderError> {
        self.calls.users_by_address.record(&[address, api_key]);
        if self.social_hangs {
            return std::future::pending().await;
        }
        self.users_by_address.clone().ok_or_else(|| server_error("neynar"))
    }
}

#[async_trait]
impl ChainRpc for FakeUpstreams {
    async fn first_inbound_transfer_block(
        &self,
        address: &str,
        api_key: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.calls.transfers.record(&[address, api_key]);
        self.chain_latency().await;
        Ok(self.transfer_block.clone())
    }

    async fn block_timestamp(
        &self,
        block: &str,
        api_key: &str,
    ) -> Result<Option<u64>, ProviderError> {
        self.calls.blocks.record(&[block, api_key]);
        self.chain_latency().await;
        Ok(self.block_timestamp)
    }
}
