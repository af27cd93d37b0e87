//! Postgres adapter for the master collection.
//!
//! Expects the application's `master` table: `ticker text`, `name text`,
//! `etrade_pattern_lookup boolean` (nullable; NULL means the flag was never
//! set). All SQL is runtime-checked (sqlx::query, not sqlx::query!) so the
//! crate builds without a database.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::model::{FlagState, MasterFlagRow, UpdateOutcome};
use crate::store::MasterStore;

/// Postgres-backed master store.
pub struct PgMasterStore {
    pool: PgPool,
}

impl PgMasterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MasterStore for PgMasterStore {
    async fn count_all(&self) -> Result<u64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT count(*) FROM master")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }

    async fn count_flag(&self, state: FlagState) -> Result<u64> {
        let sql = match state {
            FlagState::Enabled => "SELECT count(*) FROM master WHERE etrade_pattern_lookup = TRUE",
            FlagState::Disabled => {
                "SELECT count(*) FROM master WHERE etrade_pattern_lookup = FALSE"
            }
            FlagState::Missing => "SELECT count(*) FROM master WHERE etrade_pattern_lookup IS NULL",
        };
        let row = sqlx::query_as::<_, (i64,)>(sql).fetch_one(&self.pool).await?;
        Ok(row.0 as u64)
    }

    async fn sample_missing(&self, limit: i64) -> Result<Vec<MasterFlagRow>> {
        let rows = sqlx::query_as::<_, (String, Option<String>, Option<bool>)>(
            r#"
            SELECT ticker, name, etrade_pattern_lookup
            FROM master
            WHERE etrade_pattern_lookup IS NULL
            ORDER BY ticker
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(ticker, name, flag)| MasterFlagRow {
                ticker,
                name,
                etrade_pattern_lookup: flag,
            })
            .collect())
    }

    async fn flags_for_tickers(&self, tickers: &[String]) -> Result<Vec<MasterFlagRow>> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, (String, Option<bool>)>(
            r#"
            SELECT ticker, etrade_pattern_lookup
            FROM master
            WHERE ticker = ANY($1)
            ORDER BY ticker
            "#,
        )
        .bind(tickers)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(ticker, flag)| MasterFlagRow {
                ticker,
                name: None,
                etrade_pattern_lookup: flag,
            })
            .collect())
    }

    async fn backfill_missing(&self, value: bool) -> Result<UpdateOutcome> {
        let result =
            sqlx::query("UPDATE master SET etrade_pattern_lookup = $1 WHERE etrade_pattern_lookup IS NULL")
                .bind(value)
                .execute(&self.pool)
                .await?;
        // Postgres reports one affected-row count; for this filter every
        // matched row changes, so matched and modified coincide.
        let n = result.rows_affected();
        Ok(UpdateOutcome {
            matched: n,
            modified: n,
        })
    }

    async fn enable_tickers(&self, tickers: &[String]) -> Result<UpdateOutcome> {
        if tickers.is_empty() {
            return Ok(UpdateOutcome::default());
        }
        let result =
            sqlx::query("UPDATE master SET etrade_pattern_lookup = TRUE WHERE ticker = ANY($1)")
                .bind(tickers)
                .execute(&self.pool)
                .await?;
        let n = result.rows_affected();
        Ok(UpdateOutcome {
            matched: n,
            modified: n,
        })
    }
}
