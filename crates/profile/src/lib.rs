//! Merges the partial answers of every upstream provider into one
//! [`TokenProfile`].
//!
//! The pure reconciliation rules live in their own modules; [`Aggregator`]
//! drives the two-stage fan-out that feeds them.

pub mod age;
pub mod aggregator;
pub mod creator;
pub mod holders;
pub mod market;
pub mod metadata;
pub mod profile;
pub mod query;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use age::TokenAge;
pub use aggregator::{Aggregator, Providers};
pub use creator::CreatorInfo;
pub use holders::RelevantHolder;
pub use market::{LinkKind, MarketLinks};
pub use metadata::CoinMetadata;
pub use profile::TokenProfile;
pub use query::TokenQuery;

/// Treat empty strings the way upstream payloads mean them: as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
