//! Operator tooling for the swan `master` collection.
//!
//! Masters created before the eTrade pattern integration carry no
//! `etradePatternLookup` flag, and the pattern fetch only considers masters
//! where it is explicitly `true`. This crate audits the flag distribution,
//! backfills absent flags to a default value, re-audits to verify
//! convergence, and can enable the flag for an explicit allow-list of
//! tickers.
//!
//! The collection is reached through the [`store::MasterStore`] port. The
//! Postgres adapter talks to the application's live `master` table; the
//! in-memory adapter backs the test suite.
//!
//! # Usage
//!
//! ```ignore
//! use swan_maintenance::{run_backfill, BackfillSettings, PgMasterStore};
//!
//! let store = PgMasterStore::new(pool);
//! let report = run_backfill(&store, &BackfillSettings::default()).await?;
//! assert!(report.converged);
//! ```

pub mod audit;
pub mod backfill;
pub mod config;
pub mod enable;
pub mod error;
pub mod model;
pub mod store;

pub use audit::{run_audit, AuditSettings, FlagAudit};
pub use backfill::{run_backfill, BackfillReport, BackfillSettings};
pub use config::MaintenanceConfig;
pub use enable::run_enable;
pub use error::{MaintenanceError, Result};
pub use model::{FlagDistribution, FlagState, MasterFlagRow, UpdateOutcome};
pub use store::{InMemoryMasterStore, MasterStore, PgMasterStore};
