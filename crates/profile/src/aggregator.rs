//! Two-stage fan-out over the upstream providers.
//!
//! Stage one asks Zapper, DexScreener and CoinGecko at once. Zapper is the
//! only required source: its failure ends the request. Stage two needs
//! Zapper's deployer address, and runs the holder lookup, the deployment
//! dating and the creator fallback together. Every call is bounded by the
//! configured timeout; optional sources that fail or time out become `None`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokenview_core::{ApiKeys, AppError, Endpoints};
use tokenview_providers::alchemy::AlchemyClient;
use tokenview_providers::coingecko::CoinGeckoClient;
use tokenview_providers::dexscreener::DexScreenerClient;
use tokenview_providers::neynar::NeynarClient;
use tokenview_providers::zapper::{ZapperClient, ZapperToken};
use tokenview_providers::{
    BASE_CHAIN_ID, BASE_CHAIN_SLUG, ChainRpc, MarketDataSource, MetadataSource, ProviderError,
    SocialGraph, TokenDataSource, http,
};

use crate::{
    CoinMetadata, CreatorInfo, MarketLinks, RelevantHolder, TokenAge, TokenProfile, TokenQuery,
    creator, holders, market,
};

/// The upstream collaborators, one per concern.
#[derive(Clone)]
pub struct Providers {
    pub tokens: Arc<dyn TokenDataSource>,
    pub markets: Arc<dyn MarketDataSource>,
    pub metadata: Arc<dyn MetadataSource>,
    pub social: Arc<dyn SocialGraph>,
    pub chain: Arc<dyn ChainRpc>,
}

impl Providers {
    /// Production HTTP clients sharing one connection pool.
    pub fn http(endpoints: &Endpoints) -> eyre::Result<Self> {
        let client = http::build_client()?;

        Ok(Self {
            tokens: Arc::new(ZapperClient::new(client.clone(), &endpoints.zapper_url)),
            markets: Arc::new(DexScreenerClient::new(client.clone(), &endpoints.dexscreener_url)),
            metadata: Arc::new(CoinGeckoClient::new(client.clone(), &endpoints.coingecko_url)),
            social: Arc::new(NeynarClient::new(client.clone(), &endpoints.neynar_url)),
            chain: Arc::new(AlchemyClient::new(client, &endpoints.alchemy_url)),
        })
    }
}

/// Results of the first, independent round of calls.
#[derive(Debug)]
pub struct StageOne {
    pub token: ZapperToken,
    pub market: Option<MarketLinks>,
    pub metadata: Option<CoinMetadata>,
}

/// Results of the round that depends on the resolved token.
#[derive(Debug)]
pub struct StageTwo {
    pub relevant_holders: Option<Vec<RelevantHolder>>,
    pub age: Option<TokenAge>,
    pub creator: CreatorInfo,
}

#[derive(Clone)]
pub struct Aggregator {
    providers: Providers,
    timeout: Duration,
}

impl Aggregator {
    pub fn new(providers: Providers, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub async fn build_profile(
        &self,
        query: &TokenQuery,
        keys: &ApiKeys,
    ) -> Result<TokenProfile, AppError> {
        let first = self.stage_one(&query.token_address, keys).await?;
        let creator = creator::from_deployer(first.token.deployer.as_ref());
        let second = self.stage_two(query, creator, keys).await;

        tracing::debug!(
            token = %query.token_address,
            holders = second.relevant_holders.as_ref().map_or(0, Vec::len),
            dated = second.age.is_some(),
            listed = first.market.is_some(),
            "profile assembled"
        );

        Ok(TokenProfile::assemble(
            first.token,
            second.creator,
            second.relevant_holders,
            second.age,
            first.market,
            first.metadata,
        ))
    }

    pub async fn stage_one(&self, address: &str, keys: &ApiKeys) -> Result<StageOne, AppError> {
        let (token, pairs, coin) = tokio::join!(
            self.bounded(
                "zapper",
                self.providers.tokens.fetch_token(address, BASE_CHAIN_ID, &keys.zapper),
            ),
            self.bounded("dexscreener", self.providers.markets.fetch_pairs(address)),
            self.bounded("coingecko", self.providers.metadata.fetch_coin(address)),
        );

        let token = token.map_err(token_error)?;

        Ok(StageOne {
            token,
            market: degrade(pairs).and_then(|p| market::select_listing(p, BASE_CHAIN_SLUG)),
            metadata: degrade(coin).map(CoinMetadata::from_coin),
        })
    }

    pub async fn stage_two(
        &self,
        query: &TokenQuery,
        creator: CreatorInfo,
        keys: &ApiKeys,
    ) -> StageTwo {
        let (relevant_holders, age, creator) = tokio::join!(
            self.relevant_holders(&query.token_address, &query.fid, keys),
            self.token_age(&query.token_address, keys),
            self.resolve_creator(creator, keys),
        );

        StageTwo {
            relevant_holders,
            age,
            creator,
        }
    }

    async fn relevant_holders(
        &self,
        address: &str,
        viewer_fid: &str,
        keys: &ApiKeys,
    ) -> Option<Vec<RelevantHolder>> {
        let owners = self
            .bounded(
                "neynar",
                self.providers.social.relevant_owners(address, viewer_fid, &keys.neynar),
            )
            .await;
        degrade(owners).and_then(holders::from_owners)
    }

    /// Both Alchemy calls share one timeout.
    async fn token_age(&self, address: &str, keys: &ApiKeys) -> Option<TokenAge> {
        let chain = &self.providers.chain;
        let lookup = async {
            match chain.first_inbound_transfer_block(address, &keys.alchemy).await {
                Ok(Some(block)) => chain.block_timestamp(&block, &keys.alchemy).await,
                Ok(None) => Ok(None),
                Err(err) => Err(err),
            }
        };

        let secs = degrade(self.bounded("alchemy", lookup).await).flatten()?;
        Some(TokenAge::from_block_secs(secs, chrono::Utc::now().timestamp_millis()))
    }

    async fn resolve_creator(&self, primary: CreatorInfo, keys: &ApiKeys) -> CreatorInfo {
        let Some(address) = creator::fallback_address(&primary) else {
            return primary;
        };

        let users = self
            .bounded("neynar", self.providers.social.users_by_address(address, &keys.neynar))
            .await;
        creator::apply_fallback(primary, degrade(users))
    }

    async fn bounded<T, F>(&self, provider: &'static str, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(ProviderError::Timeout(provider)))
    }
}

/// Optional sources never fail the request.
fn degrade<T>(result: Result<T, ProviderError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(provider = err.provider(), error = %err, "optional provider unavailable");
            None
        }
    }
}

fn token_error(err: ProviderError) -> AppError {
    tracing::warn!(error = %err, "token lookup failed");
    match err {
        ProviderError::Status { status, body, .. } => AppError::UpstreamStatus {
            status,
            details: body,
        },
        ProviderError::GraphQl { messages, .. } => AppError::UpstreamGraphQl(messages),
        ProviderError::NotFound(_) => AppError::TokenNotFound,
        ProviderError::Timeout(provider) => AppError::UpstreamTimeout(provider),
        other => AppError::Other(eyre::Report::new(other)),
    }
}
