//! Opt-in enablement of the flag for an explicit allow-list.
//!
//! Deliberately separate from the backfill procedure: nothing turns lookups
//! on unless an operator names the tickers. There is no default allow-list
//! and an empty one is rejected.

use crate::error::{MaintenanceError, Result};
use crate::model::UpdateOutcome;
use crate::store::MasterStore;

/// Set `etradePatternLookup` to `true` for the named tickers, then re-probe
/// and log the resulting state of each.
pub async fn run_enable(store: &dyn MasterStore, tickers: &[String]) -> Result<UpdateOutcome> {
    if tickers.is_empty() {
        return Err(MaintenanceError::InvalidInput(
            "enable requires at least one ticker".into(),
        ));
    }

    let outcome = store.enable_tickers(tickers).await?;
    tracing::info!(
        target: "maintenance.enable",
        matched = outcome.matched,
        modified = outcome.modified,
        tickers = ?tickers,
        "enabled eTrade pattern lookup"
    );

    let after = store.flags_for_tickers(tickers).await?;
    for row in &after {
        tracing::info!(
            target: "maintenance.enable",
            ticker = %row.ticker,
            flag = %row.state(),
            "post-enable state"
        );
    }
    for ticker in tickers {
        if !after.iter().any(|row| row.ticker == *ticker) {
            tracing::warn!(
                target: "maintenance.enable",
                ticker = %ticker,
                "no master record for ticker"
            );
        }
    }

    Ok(outcome)
}
