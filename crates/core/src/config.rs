use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::AppError;

pub const DEFAULT_ZAPPER_URL: &str = "https://public.zapper.xyz/graphql";
pub const DEFAULT_DEXSCREENER_URL: &str = "https://api.dexscreener.com";
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_NEYNAR_URL: &str = "https://api.neynar.com";
pub const DEFAULT_ALCHEMY_URL: &str = "https://base-mainnet.g.alchemy.com/v2";

/// Global application settings loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Port for the API server.
    pub api_port: u16,

    /// Upper bound for every outbound provider call, in milliseconds.
    pub upstream_timeout_ms: u64,

    /// Provider secrets. Checked per request, not at startup.
    pub credentials: Credentials,

    /// Provider base URLs.
    pub endpoints: Endpoints,
}

/// The three provider secrets, each optional until a request needs it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub zapper_key: Option<String>,
    pub neynar_key: Option<String>,
    pub alchemy_key: Option<String>,
}

/// Credentials that passed [`Credentials::require`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeys {
    pub zapper: String,
    pub neynar: String,
    pub alchemy: String,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Endpoints {
    pub zapper_url: String,
    pub dexscreener_url: String,
    pub coingecko_url: String,
    pub neynar_url: String,
    pub alchemy_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            zapper_url: DEFAULT_ZAPPER_URL.into(),
            dexscreener_url: DEFAULT_DEXSCREENER_URL.into(),
            coingecko_url: DEFAULT_COINGECKO_URL.into(),
            neynar_url: DEFAULT_NEYNAR_URL.into(),
            alchemy_url: DEFAULT_ALCHEMY_URL.into(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables (with optional `.env` file).
    pub fn from_env() -> eyre::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let secret = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            api_port: parse_var("API_PORT", var("API_PORT", "3000"))?,
            upstream_timeout_ms: parse_var(
                "UPSTREAM_TIMEOUT_MS",
                var("UPSTREAM_TIMEOUT_MS", "10000"),
            )?,
            credentials: Credentials {
                zapper_key: secret("ZAPPER_KEY"),
                neynar_key: secret("NEYNAR_KEY"),
                alchemy_key: secret("ALCHEMY_KEY"),
            },
            endpoints: Endpoints {
                zapper_url: var("ZAPPER_URL", DEFAULT_ZAPPER_URL),
                dexscreener_url: var("DEXSCREENER_URL", DEFAULT_DEXSCREENER_URL),
                coingecko_url: var("COINGECKO_URL", DEFAULT_COINGECKO_URL),
                neynar_url: var("NEYNAR_URL", DEFAULT_NEYNAR_URL),
                alchemy_url: var("ALCHEMY_URL", DEFAULT_ALCHEMY_URL),
            },
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

fn parse_var<T>(key: &str, raw: String) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e| AppError::Config(format!("{key}={raw:?} is invalid: {e}")))
}

impl Credentials {
    /// Resolve every secret or name the first one that is missing.
    ///
    /// Order is fixed: `ZAPPER_KEY`, `NEYNAR_KEY`, `ALCHEMY_KEY`.
    pub fn require(&self) -> Result<ApiKeys, AppError> {
        fn present(value: &Option<String>, name: &'static str) -> Result<String, AppError> {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(AppError::MissingCredential(name))
        }

        Ok(ApiKeys {
            zapper: present(&self.zapper_key, "ZAPPER_KEY")?,
            neynar: present(&self.neynar_key, "NEYNAR_KEY")?,
            alchemy: present(&self.alchemy_key, "ALCHEMY_KEY")?,
        })
    }
}
