//! The backfill procedure: audit, repair, verify.
//!
//! Runs the three-step sequence against a [`MasterStore`]:
//! audit the flag distribution, set the flag on every record where it is
//! absent in one bulk conditional update, then re-audit and check that no
//! record is left missing it. Re-running is safe: once no record is in the
//! absent state the update matches nothing.
//!
//! Store faults propagate unmodified and halt the procedure; there is no
//! rollback or resume. The operator re-runs instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{run_audit, AuditSettings, FlagAudit};
use crate::error::Result;
use crate::model::UpdateOutcome;
use crate::store::MasterStore;

/// Configuration for a backfill run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillSettings {
    /// Value written into records missing the flag. The platform default is
    /// `false`: lookups stay disabled until explicitly enabled per ticker.
    pub default_value: bool,
    /// Settings for the pre and post audits.
    pub audit: AuditSettings,
}

impl Default for BackfillSettings {
    fn default() -> Self {
        Self {
            default_value: false,
            audit: AuditSettings::default(),
        }
    }
}

/// Result of a backfill run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillReport {
    /// Audit taken before the update.
    pub pre: FlagAudit,
    /// Matched/modified counts from the bulk update.
    pub update: UpdateOutcome,
    /// Audit taken after the update.
    pub post: FlagAudit,
    /// True when the post audit found no record missing the flag.
    pub converged: bool,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

/// Run the full audit, backfill, verify sequence.
pub async fn run_backfill(
    store: &dyn MasterStore,
    settings: &BackfillSettings,
) -> Result<BackfillReport> {
    let pre = run_audit(store, &settings.audit).await?;
    pre.log("pre");

    let update = store.backfill_missing(settings.default_value).await?;
    if update.matched != pre.counts.missing {
        // Acceptable for a one-shot tool; the post audit has the last word.
        tracing::warn!(
            target: "maintenance.backfill",
            matched = update.matched,
            expected = pre.counts.missing,
            "matched count differs from pre-audit; concurrent writer likely"
        );
    }
    tracing::info!(
        target: "maintenance.backfill",
        matched = update.matched,
        modified = update.modified,
        value = settings.default_value,
        "backfilled missing flags"
    );

    let post = run_audit(store, &settings.audit).await?;
    post.log("post");

    let converged = post.counts.converged();
    if converged {
        tracing::info!(
            target: "maintenance.backfill",
            "verification passed: every master has etradePatternLookup set"
        );
    } else {
        tracing::error!(
            target: "maintenance.backfill",
            missing = post.counts.missing,
            "verification failed: masters still missing etradePatternLookup"
        );
    }

    Ok(BackfillReport {
        pre,
        update,
        post,
        converged,
        finished_at: Utc::now(),
    })
}
