//! Access to the `master` collection.
//!
//! [`MasterStore`] is the port this tool needs from the collection: counts
//! with a flag-state filter, a bounded projected sample, a probe for an
//! explicit ticker set, and two bulk updates. Adapters implement it for
//! Postgres ([`PgMasterStore`]) and in memory ([`InMemoryMasterStore`]).

mod memory;
mod postgres;

pub use memory::InMemoryMasterStore;
pub use postgres::PgMasterStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{FlagState, MasterFlagRow, UpdateOutcome};

/// Port trait for the master collection.
#[async_trait]
pub trait MasterStore: Send + Sync {
    /// Total number of master records.
    async fn count_all(&self) -> Result<u64>;

    /// Number of records whose flag is in the given state.
    async fn count_flag(&self, state: FlagState) -> Result<u64>;

    /// Up to `limit` records missing the flag, projecting ticker and name,
    /// ordered by ticker.
    async fn sample_missing(&self, limit: i64) -> Result<Vec<MasterFlagRow>>;

    /// Flag state for an explicit ticker set, ordered by ticker. Tickers
    /// with no master record are absent from the result.
    async fn flags_for_tickers(&self, tickers: &[String]) -> Result<Vec<MasterFlagRow>>;

    /// Set the flag to `value` on every record where it is absent, in one
    /// bulk conditional update. Records whose flag is present are untouched.
    async fn backfill_missing(&self, value: bool) -> Result<UpdateOutcome>;

    /// Set the flag to `true` on every record whose ticker is in the list.
    async fn enable_tickers(&self, tickers: &[String]) -> Result<UpdateOutcome>;
}
