//! In-memory master store, for tests and local dry runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{FlagState, MasterFlagRow, UpdateOutcome};
use crate::store::MasterStore;

#[derive(Debug, Clone)]
struct MasterDoc {
    name: Option<String>,
    etrade_pattern_lookup: Option<bool>,
}

/// Master store held in memory, keyed by ticker.
///
/// Unlike Postgres, this adapter reports matched and modified separately, so
/// tests can distinguish filter hits from actual writes.
#[derive(Clone, Default)]
pub struct InMemoryMasterStore {
    records: Arc<RwLock<BTreeMap<String, MasterDoc>>>,
}

impl InMemoryMasterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a master record. Pass `None` for a record predating the flag.
    pub async fn insert(&self, ticker: &str, name: &str, flag: Option<bool>) {
        let mut records = self.records.write().await;
        records.insert(
            ticker.to_string(),
            MasterDoc {
                name: Some(name.to_string()),
                etrade_pattern_lookup: flag,
            },
        );
    }

    /// Flag of a single record: `None` if the ticker is unknown, otherwise
    /// the stored `Option<bool>`.
    pub async fn flag_of(&self, ticker: &str) -> Option<Option<bool>> {
        let records = self.records.read().await;
        records.get(ticker).map(|doc| doc.etrade_pattern_lookup)
    }
}

#[async_trait]
impl MasterStore for InMemoryMasterStore {
    async fn count_all(&self) -> Result<u64> {
        let records = self.records.read().await;
        Ok(records.len() as u64)
    }

    async fn count_flag(&self, state: FlagState) -> Result<u64> {
        let records = self.records.read().await;
        let n = records
            .values()
            .filter(|doc| FlagState::from(doc.etrade_pattern_lookup) == state)
            .count();
        Ok(n as u64)
    }

    async fn sample_missing(&self, limit: i64) -> Result<Vec<MasterFlagRow>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|(_, doc)| doc.etrade_pattern_lookup.is_none())
            .take(limit.max(0) as usize)
            .map(|(ticker, doc)| MasterFlagRow {
                ticker: ticker.clone(),
                name: doc.name.clone(),
                etrade_pattern_lookup: doc.etrade_pattern_lookup,
            })
            .collect())
    }

    async fn flags_for_tickers(&self, tickers: &[String]) -> Result<Vec<MasterFlagRow>> {
        let records = self.records.read().await;
        let mut rows: Vec<MasterFlagRow> = records
            .iter()
            .filter(|(ticker, _)| tickers.contains(*ticker))
            .map(|(ticker, doc)| MasterFlagRow {
                ticker: ticker.clone(),
                name: None,
                etrade_pattern_lookup: doc.etrade_pattern_lookup,
            })
            .collect();
        rows.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        Ok(rows)
    }

    async fn backfill_missing(&self, value: bool) -> Result<UpdateOutcome> {
        let mut records = self.records.write().await;
        let mut outcome = UpdateOutcome::default();
        for doc in records.values_mut() {
            if doc.etrade_pattern_lookup.is_none() {
                outcome.matched += 1;
                doc.etrade_pattern_lookup = Some(value);
                outcome.modified += 1;
            }
        }
        Ok(outcome)
    }

    async fn enable_tickers(&self, tickers: &[String]) -> Result<UpdateOutcome> {
        let mut records = self.records.write().await;
        let mut outcome = UpdateOutcome::default();
        for (ticker, doc) in records.iter_mut() {
            if tickers.contains(ticker) {
                outcome.matched += 1;
                if doc.etrade_pattern_lookup != Some(true) {
                    doc.etrade_pattern_lookup = Some(true);
                    outcome.modified += 1;
                }
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn counts_by_flag_state() {
        let store = InMemoryMasterStore::new();
        store.insert("AAPL", "Apple Inc", Some(true)).await;
        store.insert("HODU", "Hodu Holdings", Some(false)).await;
        store.insert("ELTP", "Elite Pharmaceuticals", None).await;

        assert_eq!(store.count_all().await.unwrap(), 3);
        assert_eq!(store.count_flag(FlagState::Enabled).await.unwrap(), 1);
        assert_eq!(store.count_flag(FlagState::Disabled).await.unwrap(), 1);
        assert_eq!(store.count_flag(FlagState::Missing).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn sample_missing_is_bounded_and_ordered() {
        let store = InMemoryMasterStore::new();
        store.insert("CONX", "CONX Corp", None).await;
        store.insert("ELTP", "Elite Pharmaceuticals", None).await;
        store.insert("AAPL", "Apple Inc", None).await;

        let sample = store.sample_missing(2).await.unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0].ticker, "AAPL");
        assert_eq!(sample[1].ticker, "CONX");
        assert_eq!(sample[0].name.as_deref(), Some("Apple Inc"));
    }

    #[tokio::test]
    async fn probe_skips_unknown_tickers() {
        let store = InMemoryMasterStore::new();
        store.insert("ELTP", "Elite Pharmaceuticals", None).await;

        let rows = store
            .flags_for_tickers(&tickers(&["ELTP", "ZZZZ"]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "ELTP");
        assert_eq!(rows[0].state(), FlagState::Missing);
    }

    #[tokio::test]
    async fn enable_distinguishes_matched_from_modified() {
        let store = InMemoryMasterStore::new();
        store.insert("AAPL", "Apple Inc", Some(true)).await;
        store.insert("MSFT", "Microsoft Corp", Some(false)).await;

        let outcome = store
            .enable_tickers(&tickers(&["AAPL", "MSFT"]))
            .await
            .unwrap();
        assert_eq!(outcome.matched, 2);
        assert_eq!(outcome.modified, 1);
        assert_eq!(store.flag_of("MSFT").await, Some(Some(true)));
    }

    #[tokio::test]
    async fn enable_with_empty_list_is_a_no_op() {
        let store = InMemoryMasterStore::new();
        store.insert("AAPL", "Apple Inc", Some(false)).await;

        let outcome = store.enable_tickers(&[]).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::default());
        assert_eq!(store.flag_of("AAPL").await, Some(Some(false)));
    }
}
