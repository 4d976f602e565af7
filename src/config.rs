use crate::db::{init_db, Database};
use crate::errors::ServerError;
use crate::state::AppState;
use crate::store::{MemoryPortfolioStore, PortfolioStore, SqlitePortfolioStore};
use crate::upstream::{BridgeClient, UpstreamError};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Portfolio cap-rate service
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Access token for the upstream valuation API
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5001")]
    pub bind: SocketAddr,

    /// SQLite file holding saved portfolios
    #[arg(long, env = "DATABASE_PATH", default_value = "portfolios.sqlite3")]
    pub database: String,

    #[arg(long, env = "SCHEMA_PATH", default_value = "sql/schema.sql")]
    pub schema: String,

    /// Where saved portfolios are kept
    #[arg(long, env = "PORTFOLIO_STORE", value_enum, default_value_t = StoreKind::Sqlite)]
    pub store: StoreKind,

    #[arg(long, env = "WORKERS", default_value_t = 8)]
    pub workers: usize,

    #[arg(
        long,
        env = "UPSTREAM_URL",
        default_value = "https://api.bridgedataoutput.com/api/v2"
    )]
    pub upstream_url: String,

    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Default nearby search size, clamped to 1..=200
    #[arg(long, env = "NEARBY_LIMIT", default_value_t = 200)]
    pub nearby_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Persistent, uncapped
    Sqlite,
    /// Process-local, keeps the 10 most recent
    Memory,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("API_KEY is not set")]
    MissingApiKey,

    #[error("upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("database initialization failed: {0}")]
    Database(#[from] ServerError),
}

impl Config {
    /// Wires the upstream client and the portfolio store into shared state.
    pub fn build_state(&self) -> Result<AppState, StartupError> {
        if self.api_key.trim().is_empty() {
            return Err(StartupError::MissingApiKey);
        }

        let api = BridgeClient::new(
            &self.upstream_url,
            self.api_key.trim(),
            Duration::from_secs(self.upstream_timeout_secs),
        )?;

        let store: Arc<dyn PortfolioStore> = match self.store {
            StoreKind::Sqlite => {
                let db = Database::new(self.database.clone());
                init_db(&db, &self.schema)?;
                Arc::new(SqlitePortfolioStore::new(db))
            }
            StoreKind::Memory => Arc::new(MemoryPortfolioStore::new()),
        };

        info!(
            "Upstream {} (timeout {}s), store {:?}",
            self.upstream_url, self.upstream_timeout_secs, self.store
        );

        Ok(AppState::new(Arc::new(api), store).with_nearby_limit(self.nearby_limit))
    }
}
