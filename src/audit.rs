//! Audit of the eTrade pattern flag across the master collection.
//!
//! An audit reads the flag distribution, a bounded sample of records still
//! missing the flag, and the flag state of a watchlist of tickers the
//! operators eyeball before and after a repair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{FlagDistribution, FlagState, MasterFlagRow};
use crate::store::MasterStore;

/// Tickers the operators check by hand around a repair run.
pub const DEFAULT_WATCHLIST: &[&str] = &["ELTP", "HODU", "CONX"];

/// Default bound on the missing-flag sample.
pub const DEFAULT_SAMPLE_LIMIT: i64 = 5;

/// What an audit reads and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Max records sampled from those missing the flag.
    pub sample_limit: i64,
    /// Tickers whose flag state is probed and logged.
    pub watchlist: Vec<String>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            watchlist: DEFAULT_WATCHLIST.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Snapshot of the flag's state across the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagAudit {
    /// Total/enabled/disabled/missing counts.
    pub counts: FlagDistribution,
    /// Bounded sample of records missing the flag (ticker and name).
    pub missing_sample: Vec<MasterFlagRow>,
    /// Flag state of the watchlist tickers.
    pub watchlist: Vec<MasterFlagRow>,
    /// When the audit ran.
    pub audited_at: DateTime<Utc>,
}

impl FlagAudit {
    /// Emit the operator-readable summary. `phase` labels the run
    /// ("pre", "post", or "audit").
    pub fn log(&self, phase: &str) {
        tracing::info!(
            target: "maintenance.audit",
            phase,
            total = self.counts.total,
            enabled = self.counts.enabled,
            disabled = self.counts.disabled,
            missing = self.counts.missing,
            "etradePatternLookup distribution"
        );
        if self.counts.unaccounted() != 0 {
            tracing::warn!(
                target: "maintenance.audit",
                phase,
                unaccounted = self.counts.unaccounted(),
                "counts drifted between reads; concurrent writer likely"
            );
        }
        for row in &self.missing_sample {
            tracing::info!(
                target: "maintenance.audit",
                phase,
                ticker = %row.ticker,
                name = row.name.as_deref().unwrap_or(""),
                "flag missing"
            );
        }
        for row in &self.watchlist {
            tracing::info!(
                target: "maintenance.audit",
                phase,
                ticker = %row.ticker,
                flag = %row.state(),
                "watchlist"
            );
        }
    }
}

/// Read the counts, the missing-flag sample, and the watchlist states.
///
/// Reads are advisory: each is a separate query, so the snapshot can be
/// stale relative to concurrent writers.
pub async fn run_audit(store: &dyn MasterStore, settings: &AuditSettings) -> Result<FlagAudit> {
    let total = store.count_all().await?;
    let enabled = store.count_flag(FlagState::Enabled).await?;
    let disabled = store.count_flag(FlagState::Disabled).await?;
    let missing = store.count_flag(FlagState::Missing).await?;

    let missing_sample = store.sample_missing(settings.sample_limit).await?;
    let watchlist = store.flags_for_tickers(&settings.watchlist).await?;

    Ok(FlagAudit {
        counts: FlagDistribution {
            total,
            enabled,
            disabled,
            missing,
        },
        missing_sample,
        watchlist,
        audited_at: Utc::now(),
    })
}
