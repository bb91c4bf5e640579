use std::sync::Arc;
use std::time::Duration;

use tokenview_core::{ApiKeys, AppError};
use tokenview_profile::testing::{FakeUpstreams, TokenReply, token_with_deployer};
use tokenview_profile::{Aggregator, TokenQuery};
use tokenview_providers::coingecko::{CoinGeckoCoin, Description};
use tokenview_providers::dexscreener::{DexPair, PairInfo, Social, Website};
use tokenview_providers::neynar::NeynarUser;

const TOKEN: &str = "0x4ed4e862860bed51a9570b96d89af5e1b0efefed";
const DEPLOYER: &str = "0x00000000000000000000000000000000000dead1";

fn keys() -> ApiKeys {
    ApiKeys {
        zapper: "zk".into(),
        neynar: "nk".into(),
        alchemy: "ak".into(),
    }
}

fn query() -> TokenQuery {
    TokenQuery::new(Some("3".into()), Some(TOKEN.into())).unwrap()
}

fn aggregator(fake: &Arc<FakeUpstreams>) -> Aggregator {
    Aggregator::new(fake.clone().providers(), Duration::from_millis(200))
}

fn user(fid: u64, username: &str) -> NeynarUser {
    NeynarUser {
        fid: Some(fid.to_string()),
        username: Some(username.into()),
        pfp_url: Some(format!("https://img/{username}.png")),
        custody_address: Some(format!("0xcustody{fid}")),
        ..Default::default()
    }
}

fn base_pair() -> DexPair {
    DexPair {
        chain_id: "base".into(),
        url: Some("https://dexscreener.com/base/0xpool".into()),
        info: Some(PairInfo {
            websites: Some(vec![Website {
                url: Some("https://degen.tips".into()),
            }]),
            socials: Some(vec![
                Social {
                    kind: Some("twitter".into()),
                    url: Some("https://x.com/degentokenbase".into()),
                },
                Social {
                    kind: Some("telegram".into()),
                    url: Some("https://t.me/degen".into()),
                },
            ]),
        }),
    }
}

fn healthy() -> FakeUpstreams {
    FakeUpstreams {
        token: TokenReply::Found(token_with_deployer(TOKEN, DEPLOYER, Some("jacek"))),
        pairs: Some(vec![base_pair()]),
        coin: Some(CoinGeckoCoin {
            id: Some("degen-base".into()),
            description: Some(Description {
                en: Some("Degen tips.".into()),
            }),
        }),
        owners: Some(vec![user(3, "dwr"), user(2, "v")]),
        users_by_address: Some(vec![user(99, "fallback")]),
        transfer_block: Some("0x1a2b".into()),
        block_timestamp: Some(1_700_000_000),
        ..Default::default()
    }
}

#[tokio::test]
async fn builds_full_profile() {
    let fake = Arc::new(healthy());
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(profile.address, TOKEN);
    assert_eq!(profile.holder_count, Some(1234));
    assert_eq!(profile.creator.farcaster_username.as_deref(), Some("jacek"));
    assert_eq!(profile.relevant_holders.as_ref().unwrap().len(), 2);
    assert_eq!(profile.website.as_deref(), Some("https://degen.tips"));
    assert_eq!(profile.twitter.as_deref(), Some("https://x.com/degentokenbase"));
    assert_eq!(profile.telegram.as_deref(), Some("https://t.me/degen"));
    assert_eq!(profile.dexscreener_url.as_deref(), Some("https://dexscreener.com/base/0xpool"));
    assert_eq!(profile.description.as_deref(), Some("Degen tips."));
    assert_eq!(
        profile.coin_gecko_url.as_deref(),
        Some("https://www.coingecko.com/en/coins/degen-base")
    );

    let age = profile.age.unwrap();
    assert_eq!(age.created_at, 1_700_000_000_000);
    assert!(age.age_in_days > 0);
}

#[tokio::test]
async fn upstream_status_is_relayed_and_stage_two_skipped() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::Status(429, "rate limited".into()),
        ..healthy()
    });
    let err = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap_err();

    assert_eq!(err.status_code(), 429);
    assert_eq!(err.details().as_deref(), Some("rate limited"));
    assert_eq!(fake.count(|c| &c.relevant_owners), 0);
    assert_eq!(fake.count(|c| &c.users_by_address), 0);
    assert_eq!(fake.count(|c| &c.transfers), 0);
}

#[tokio::test]
async fn graphql_errors_become_500() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::GraphQl(vec!["Address is invalid".into()]),
        ..healthy()
    });
    let err = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap_err();

    assert!(matches!(err, AppError::UpstreamGraphQl(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn missing_token_is_404() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::NotFound,
        ..healthy()
    });
    let err = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap_err();

    assert!(matches!(err, AppError::TokenNotFound));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn embedded_username_skips_fallback_lookup() {
    let fake = Arc::new(healthy());
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(profile.creator.farcaster_username.as_deref(), Some("jacek"));
    assert_eq!(fake.count(|c| &c.users_by_address), 0);
}

#[tokio::test]
async fn fallback_lookup_keeps_deployer_address() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::Found(token_with_deployer(TOKEN, DEPLOYER, None)),
        ..healthy()
    });
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(fake.count(|c| &c.users_by_address), 1);
    assert_eq!(profile.creator.address.as_deref(), Some(DEPLOYER));
    assert_eq!(profile.creator.farcaster_username.as_deref(), Some("fallback"));
    assert_eq!(profile.creator.farcaster_fid.as_deref(), Some("99"));
    assert_eq!(profile.creator.farcaster_pfp.as_deref(), Some("https://img/fallback.png"));
}

#[tokio::test]
async fn no_base_pair_leaves_links_null() {
    let fake = Arc::new(FakeUpstreams {
        pairs: Some(vec![DexPair {
            chain_id: "ethereum".into(),
            ..base_pair()
        }]),
        ..healthy()
    });
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(profile.website, None);
    assert_eq!(profile.telegram, None);
    assert_eq!(profile.twitter, None);
    assert_eq!(profile.dexscreener_url, None);
}

#[tokio::test]
async fn relevant_holders_are_capped_at_ten() {
    let fake = Arc::new(FakeUpstreams {
        owners: Some((0..15).map(|n| user(n, &format!("u{n}"))).collect()),
        ..healthy()
    });
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    let holders = profile.relevant_holders.unwrap();
    assert_eq!(holders.len(), 10);
    assert_eq!(holders[0].farcaster_username.as_deref(), Some("u0"));
    assert_eq!(holders[9].farcaster_username.as_deref(), Some("u9"));
    assert_eq!(holders[4].address.as_deref(), Some("0xcustody4"));
}

#[tokio::test]
async fn optional_outages_degrade_to_null() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::Found(token_with_deployer(TOKEN, DEPLOYER, None)),
        pairs: None,
        coin: None,
        owners: None,
        users_by_address: None,
        ..healthy()
    });
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(profile.website, None);
    assert_eq!(profile.description, None);
    assert_eq!(profile.coin_gecko_url, None);
    assert_eq!(profile.relevant_holders, None);
    assert_eq!(profile.creator.address.as_deref(), Some(DEPLOYER));
    assert_eq!(profile.creator.farcaster_username, None);
}

#[tokio::test]
async fn empty_owner_list_is_null_not_empty() {
    let fake = Arc::new(FakeUpstreams {
        owners: Some(vec![]),
        ..healthy()
    });
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();
    assert_eq!(profile.relevant_holders, None);
}

#[tokio::test]
async fn undated_token_has_no_age() {
    let fake = Arc::new(FakeUpstreams {
        transfer_block: None,
        ..healthy()
    });
    let profile = aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(profile.age, None);
    assert_eq!(fake.count(|c| &c.blocks), 0);
}

#[tokio::test]
async fn hanging_social_graph_times_out_to_absent() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::Found(token_with_deployer(TOKEN, DEPLOYER, None)),
        social_hangs: true,
        ..healthy()
    });
    let aggregator = Aggregator::new(fake.clone().providers(), Duration::from_millis(50));
    let profile = aggregator.build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(profile.relevant_holders, None);
    assert_eq!(profile.creator.farcaster_username, None);
    assert!(profile.age.is_some());
}

#[tokio::test]
async fn hanging_token_source_times_out() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::Hang,
        ..healthy()
    });
    let aggregator = Aggregator::new(fake.clone().providers(), Duration::from_millis(50));
    let err = aggregator.build_profile(&query(), &keys()).await.unwrap_err();

    assert!(matches!(err, AppError::UpstreamTimeout("zapper")));
    assert_eq!(err.status_code(), 504);
}

#[tokio::test]
async fn repeated_requests_match_apart_from_age() {
    let fake = Arc::new(healthy());
    let agg = aggregator(&fake);

    let mut first = agg.build_profile(&query(), &keys()).await.unwrap();
    let mut second = agg.build_profile(&query(), &keys()).await.unwrap();
    assert_eq!(first.age.map(|a| a.created_at), second.age.map(|a| a.created_at));

    first.age = None;
    second.age = None;
    assert_eq!(first, second);
}

#[tokio::test]
async fn providers_receive_request_values() {
    let fake = Arc::new(FakeUpstreams {
        token: TokenReply::Found(token_with_deployer(TOKEN, DEPLOYER, None)),
        ..healthy()
    });
    aggregator(&fake).build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(fake.args(|c| &c.tokens), vec![vec![TOKEN, "8453", "zk"]]);
    assert_eq!(fake.args(|c| &c.pairs), vec![vec![TOKEN]]);
    assert_eq!(fake.args(|c| &c.coins), vec![vec![TOKEN]]);
    assert_eq!(fake.args(|c| &c.relevant_owners), vec![vec![TOKEN, "3", "nk"]]);
    assert_eq!(fake.args(|c| &c.users_by_address), vec![vec![DEPLOYER, "nk"]]);
    assert_eq!(fake.args(|c| &c.transfers), vec![vec![TOKEN, "ak"]]);
    assert_eq!(fake.args(|c| &c.blocks), vec![vec!["0x1a2b", "ak"]]);
}

#[tokio::test]
async fn deployment_dating_shares_one_timeout() {
    let fake = Arc::new(FakeUpstreams {
        chain_delay: Some(Duration::from_millis(70)),
        ..healthy()
    });
    let aggregator = Aggregator::new(fake.clone().providers(), Duration::from_millis(100));
    let profile = aggregator.build_profile(&query(), &keys()).await.unwrap();

    assert_eq!(profile.age, None);
    assert_eq!(profile.holder_count, Some(1234));
    assert_eq!(fake.count(|c| &c.transfers), 1);
}
