//! Projection and report types for the master flag audit.
//!
//! A master record carries id, ticker, name, type, added price/date, and the
//! `etradePatternLookup` boolean. This tool never materializes the full
//! record; it reads projections of the identifying fields plus the flag.

use serde::{Deserialize, Serialize};

/// State of the eTrade pattern flag on a single master record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagState {
    /// Flag present and `true`.
    Enabled,
    /// Flag present and `false`.
    Disabled,
    /// Flag absent from the record.
    Missing,
}

impl From<Option<bool>> for FlagState {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => FlagState::Enabled,
            Some(false) => FlagState::Disabled,
            None => FlagState::Missing,
        }
    }
}

impl std::fmt::Display for FlagState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlagState::Enabled => "enabled",
            FlagState::Disabled => "disabled",
            FlagState::Missing => "missing",
        };
        write!(f, "{s}")
    }
}

/// Projected view of a master record: ticker, optional name, and the flag.
///
/// Watchlist probes project only ticker and flag, so `name` is `None` there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterFlagRow {
    pub ticker: String,
    pub name: Option<String>,
    pub etrade_pattern_lookup: Option<bool>,
}

impl MasterFlagRow {
    pub fn state(&self) -> FlagState {
        FlagState::from(self.etrade_pattern_lookup)
    }
}

/// Counts of the flag's distribution across the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDistribution {
    pub total: u64,
    pub enabled: u64,
    pub disabled: u64,
    pub missing: u64,
}

impl FlagDistribution {
    /// The backfill success criterion: no record is missing the flag.
    pub fn converged(&self) -> bool {
        self.missing == 0
    }

    /// Records not covered by the three state counts. Normally zero; drifts
    /// only when a concurrent writer lands between the individual count reads.
    pub fn unaccounted(&self) -> i64 {
        self.total as i64 - (self.enabled + self.disabled + self.missing) as i64
    }
}

/// Matched/modified counts reported by a bulk update.
///
/// Matched is the number of records the filter hit; modified is the number
/// actually changed. They differ when some matched records already held the
/// target value, or under concurrent writers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_state_from_option_is_total() {
        assert_eq!(FlagState::from(Some(true)), FlagState::Enabled);
        assert_eq!(FlagState::from(Some(false)), FlagState::Disabled);
        assert_eq!(FlagState::from(None), FlagState::Missing);
    }

    #[test]
    fn flag_state_display() {
        assert_eq!(FlagState::Enabled.to_string(), "enabled");
        assert_eq!(FlagState::Disabled.to_string(), "disabled");
        assert_eq!(FlagState::Missing.to_string(), "missing");
    }

    #[test]
    fn converged_iff_no_missing() {
        let mut counts = FlagDistribution {
            total: 3,
            enabled: 1,
            disabled: 2,
            missing: 0,
        };
        assert!(counts.converged());
        counts.missing = 1;
        assert!(!counts.converged());
    }

    #[test]
    fn unaccounted_is_zero_on_quiescent_counts() {
        let counts = FlagDistribution {
            total: 5,
            enabled: 2,
            disabled: 2,
            missing: 1,
        };
        assert_eq!(counts.unaccounted(), 0);
    }

    #[test]
    fn unaccounted_signals_drift() {
        let counts = FlagDistribution {
            total: 6,
            enabled: 2,
            disabled: 2,
            missing: 1,
        };
        assert_eq!(counts.unaccounted(), 1);
    }

    #[test]
    fn row_state_tracks_flag() {
        let row = MasterFlagRow {
            ticker: "ELTP".into(),
            name: Some("Elite Pharmaceuticals".into()),
            etrade_pattern_lookup: None,
        };
        assert_eq!(row.state(), FlagState::Missing);
    }
}
