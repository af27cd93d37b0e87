//! swan-maintenance — operator CLI for the master collection flag repair.
//!
//! Reads config from env vars:
//!   SWAN_DATABASE_URL        — Postgres connection string (required)
//!   SWAN_DB_MAX_CONNECTIONS  — pool size (default: 5)
//!
//! Exit code is 1 when the backfill verification finds records still
//! missing the flag.

use clap::{Parser, Subcommand};

use swan_maintenance::audit::{run_audit, AuditSettings, DEFAULT_SAMPLE_LIMIT};
use swan_maintenance::backfill::{run_backfill, BackfillSettings};
use swan_maintenance::config::MaintenanceConfig;
use swan_maintenance::enable::run_enable;
use swan_maintenance::store::PgMasterStore;

#[derive(Parser)]
#[command(name = "swan-maintenance")]
#[command(about = "Audit and backfill the etradePatternLookup flag on master records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read-only audit: flag distribution, missing-flag sample, watchlist
    Audit {
        /// Max records to sample from those missing the flag
        #[arg(long, default_value_t = DEFAULT_SAMPLE_LIMIT)]
        sample_limit: i64,
        /// Tickers of interest to probe (default: ELTP,HODU,CONX)
        #[arg(long, value_delimiter = ',')]
        watch: Option<Vec<String>>,
    },

    /// Audit, backfill missing flags to the default value, and verify
    Backfill {
        /// Value written into records missing the flag
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        default_value: bool,
        /// Max records to sample from those missing the flag
        #[arg(long, default_value_t = DEFAULT_SAMPLE_LIMIT)]
        sample_limit: i64,
        /// Tickers of interest to probe (default: ELTP,HODU,CONX)
        #[arg(long, value_delimiter = ',')]
        watch: Option<Vec<String>>,
    },

    /// Set the flag to true for an explicit allow-list of tickers
    Enable {
        /// Tickers to enable; required, there is no default allow-list
        #[arg(long, value_delimiter = ',', required = true)]
        tickers: Vec<String>,
    },
}

fn audit_settings(sample_limit: i64, watch: Option<Vec<String>>) -> AuditSettings {
    let mut settings = AuditSettings {
        sample_limit,
        ..AuditSettings::default()
    };
    if let Some(watch) = watch {
        settings.watchlist = watch;
    }
    settings
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = MaintenanceConfig::from_env()?;
    let pool = config.connect().await?;
    tracing::info!("connected to database");
    let store = PgMasterStore::new(pool);

    match cli.command {
        Command::Audit {
            sample_limit,
            watch,
        } => {
            let settings = audit_settings(sample_limit, watch);
            let audit = run_audit(&store, &settings).await?;
            audit.log("audit");
        }

        Command::Backfill {
            default_value,
            sample_limit,
            watch,
        } => {
            let settings = BackfillSettings {
                default_value,
                audit: audit_settings(sample_limit, watch),
            };
            let report = run_backfill(&store, &settings).await?;
            if !report.converged {
                std::process::exit(1);
            }
            tracing::info!("restart the swan application so the pattern fetch rereads the flag");
            tracing::info!("then confirm the watchlist tickers are absent from its enabled list");
        }

        Command::Enable { tickers } => {
            run_enable(&store, &tickers).await?;
        }
    }

    Ok(())
}
