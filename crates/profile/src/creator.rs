//! Who deployed the token, and which Farcaster account they are.
//!
//! Zapper's embedded deployer profile is trusted first. Only when it has no
//! username is the deployer address looked up on Neynar, and a hit there
//! replaces the social fields wholesale. The address always stays Zapper's.

use serde::Serialize;
use tokenview_providers::neynar::NeynarUser;
use tokenview_providers::zapper::Deployer;

use crate::non_empty;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorInfo {
    pub address: Option<String>,
    pub farcaster_username: Option<String>,
    pub farcaster_fid: Option<String>,
    pub farcaster_pfp: Option<String>,
}

/// Creator record as embedded in the Zapper token.
pub fn from_deployer(deployer: Option<&Deployer>) -> CreatorInfo {
    let Some(deployer) = deployer else {
        return CreatorInfo::default();
    };
    let profile = deployer.farcaster_profile.as_ref();

    CreatorInfo {
        address: non_empty(deployer.address.clone()),
        farcaster_username: non_empty(profile.and_then(|p| p.username.clone())),
        farcaster_fid: non_empty(profile.and_then(|p| p.fid.clone())),
        farcaster_pfp: non_empty(
            profile
                .and_then(|p| p.metadata.as_ref())
                .and_then(|m| m.image_url.clone()),
        ),
    }
}

/// The address to look up on Neynar, if a lookup is warranted at all.
pub fn fallback_address(creator: &CreatorInfo) -> Option<&str> {
    match (&creator.address, &creator.farcaster_username) {
        (Some(address), None) => Some(address.as_str()),
        _ => None,
    }
}

/// Apply the Neynar lookup result. The first user, if any, wins outright.
pub fn apply_fallback(primary: CreatorInfo, users: Option<Vec<NeynarUser>>) -> CreatorInfo {
    let Some(user) = users.and_then(|u| u.into_iter().next()) else {
        return primary;
    };

    CreatorInfo {
        address: primary.address,
        farcaster_username: non_empty(user.username),
        farcaster_fid: non_empty(user.fid),
        farcaster_pfp: non_empty(user.pfp_url),
    }
}
