use serde::Serialize;

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time since the token's deployment block.
///
/// Recomputed on every request relative to the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAge {
    /// Deployment block timestamp, epoch milliseconds.
    pub created_at: i64,
    pub age_in_days: i64,
    pub age_in_hours: i64,
    pub age_in_minutes: i64,
}

impl TokenAge {
    /// Floor-divided ages. A block "in the future" (clock skew) is age zero.
    pub fn between(created_at_ms: i64, now_ms: i64) -> Self {
        let age = now_ms.saturating_sub(created_at_ms).max(0);
        Self {
            created_at: created_at_ms,
            age_in_days: age / MS_PER_DAY,
            age_in_hours: age / MS_PER_HOUR,
            age_in_minutes: age / MS_PER_MINUTE,
        }
    }

    /// From a block timestamp in seconds, as chain RPCs report it.
    pub fn from_block_secs(block_secs: u64, now_ms: i64) -> Self {
        let created_at_ms = i64::try_from(block_secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        Self::between(created_at_ms, now_ms)
    }
}
