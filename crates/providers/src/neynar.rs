//! Neynar client: Farcaster users holding a token, and users behind an address.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::de::string_or_number;
use crate::{BASE_CHAIN_SLUG, ProviderError, SocialGraph, http};

const PROVIDER: &str = "neynar";

/// Both endpoints take the key in the same header.
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Default, Deserialize)]
struct RelevantOwnersResponse {
    top_relevant_fungible_owners_hydrated: Option<Vec<NeynarUser>>,
}

/// A Farcaster user record, as hydrated by Neynar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeynarUser {
    #[serde(default, deserialize_with = "string_or_number")]
    pub fid: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub pfp_url: Option<String>,
    pub custody_address: Option<String>,
    pub verified_addresses: Option<VerifiedAddresses>,
    pub follower_count: Option<u64>,
    pub power_badge: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifiedAddresses {
    pub eth_addresses: Option<Vec<String>>,
}

pub struct NeynarClient {
    client: Client,
    base_url: String,
}

impl NeynarClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SocialGraph for NeynarClient {
    async fn relevant_owners(
        &self,
        address: &str,
        viewer_fid: &str,
        api_key: &str,
    ) -> Result<Vec<NeynarUser>, ProviderError> {
        let url = http::join(&self.base_url, "v2/farcaster/fungible/owner/relevant");
        let request = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .query(&[
                ("contract_address", address),
                ("network", BASE_CHAIN_SLUG),
                ("viewer_fid", viewer_fid),
            ]);

        let response: RelevantOwnersResponse = http::send_json(PROVIDER, request).await?;
        Ok(response.top_relevant_fungible_owners_hydrated.unwrap_or_default())
    }

    async fn users_by_address(
        &self,
        address: &str,
        api_key: &str,
    ) -> Result<Vec<NeynarUser>, ProviderError> {
        let url = http::join(&self.base_url, "v2/farcaster/user/bulk-by-address");
        let request = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .query(&[("addresses", address)]);

        let response: HashMap<String, Vec<NeynarUser>> = http::send_json(PROVIDER, request).await?;
        Ok(users_for(response, address))
    }
}

/// Neynar keys the bulk response by lowercased address.
fn users_for(mut by_address: HashMap<String, Vec<NeynarUser>>, address: &str) -> Vec<NeynarUser> {
    if let Some(users) = by_address.remove(address) {
        return users;
    }
    by_address
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(address))
        .map(|(_, users)| users)
        .unwrap_or_default()
}
