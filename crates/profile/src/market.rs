//! Project links taken from the DexScreener listing on Base.

use std::collections::HashMap;

use serde::Serialize;
use tokenview_providers::dexscreener::{DexPair, Social};

use crate::non_empty;

/// Social link categories surfaced in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Telegram,
    Twitter,
}

impl LinkKind {
    /// Map a DexScreener `type` tag. Unknown tags are ignored.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "telegram" => Some(Self::Telegram),
            "twitter" | "x" => Some(Self::Twitter),
            _ => None,
        }
    }
}

/// First URL seen for each [`LinkKind`]. Later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks(HashMap<LinkKind, String>);

impl SocialLinks {
    pub fn from_socials(socials: &[Social]) -> Self {
        let mut links = HashMap::new();
        for social in socials {
            let kind = social.kind.as_deref().and_then(LinkKind::from_tag);
            let url = social.url.as_deref().filter(|u| !u.is_empty());
            if let (Some(kind), Some(url)) = (kind, url) {
                links.entry(kind).or_insert_with(|| url.to_string());
            }
        }
        Self(links)
    }

    pub fn get(&self, kind: LinkKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketLinks {
    pub website: Option<String>,
    pub telegram: Option<String>,
    pub twitter: Option<String>,
    pub dexscreener_url: Option<String>,
}

/// Links from the first pair on `chain`, or `None` when no such pair exists.
pub fn select_listing(pairs: Vec<DexPair>, chain: &str) -> Option<MarketLinks> {
    let pair = pairs.into_iter().find(|p| p.chain_id == chain)?;
    let info = pair.info.unwrap_or_default();

    let website = info
        .websites
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|w| non_empty(w.url));
    let socials = SocialLinks::from_socials(info.socials.as_deref().unwrap_or_default());

    Some(MarketLinks {
        website,
        telegram: socials.get(LinkKind::Telegram).map(String::from),
        twitter: socials.get(LinkKind::Twitter).map(String::from),
        dexscreener_url: non_empty(pair.url),
    })
}
