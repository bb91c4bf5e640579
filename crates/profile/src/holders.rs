use serde::Serialize;
use tokenview_providers::neynar::NeynarUser;

use crate::non_empty;

/// Most holders returned to the caller.
pub const MAX_RELEVANT_HOLDERS: usize = 10;

/// A holder the viewer is connected to on Farcaster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantHolder {
    pub address: Option<String>,
    pub farcaster_username: Option<String>,
    pub farcaster_fid: Option<String>,
    pub farcaster_pfp: Option<String>,
    pub display_name: Option<String>,
    pub follower_count: Option<u64>,
    pub power_badge: bool,
}

impl From<NeynarUser> for RelevantHolder {
    fn from(owner: NeynarUser) -> Self {
        let verified = owner
            .verified_addresses
            .and_then(|v| v.eth_addresses)
            .and_then(|addrs| non_empty(addrs.into_iter().next()));

        Self {
            address: non_empty(owner.custody_address).or(verified),
            farcaster_username: non_empty(owner.username),
            farcaster_fid: non_empty(owner.fid),
            farcaster_pfp: non_empty(owner.pfp_url),
            display_name: non_empty(owner.display_name),
            follower_count: owner.follower_count,
            power_badge: owner.power_badge.unwrap_or(false),
        }
    }
}

/// Keep provider order, cap the list, and report "unknown" rather than empty.
pub fn from_owners(owners: Vec<NeynarUser>) -> Option<Vec<RelevantHolder>> {
    if owners.is_empty() {
        return None;
    }

    Some(
        owners
            .into_iter()
            .take(MAX_RELEVANT_HOLDERS)
            .map(RelevantHolder::from)
            .collect(),
    )
}
