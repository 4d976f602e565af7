mod memory;
mod sqlite;

pub use memory::MemoryPortfolioStore;
pub use sqlite::SqlitePortfolioStore;

use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named list of ZPIDs kept for later re-analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPortfolio {
    pub name: String,
    pub zpids: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

impl SavedPortfolio {
    /// Trims the name and ZPIDs, dropping blank and repeated ZPIDs.
    pub fn new(name: &str, zpids: &[String], saved_at: DateTime<Utc>) -> Result<Self, ServerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServerError::Validation("Portfolio name is required".into()));
        }

        let mut clean: Vec<String> = Vec::new();
        for zpid in zpids.iter().map(|z| z.trim()).filter(|z| !z.is_empty()) {
            if !clean.iter().any(|c| c == zpid) {
                clean.push(zpid.to_string());
            }
        }

        Ok(Self {
            name: name.to_string(),
            zpids: clean,
            saved_at,
        })
    }
}

/// Where saved portfolios live. Passed to whatever needs it instead of
/// being reached through ambient state.
pub trait PortfolioStore: Send + Sync {
    fn load(&self, name: &str) -> Result<Option<SavedPortfolio>, ServerError>;

    /// Replaces any entry with the same name.
    fn save(&self, entry: SavedPortfolio) -> Result<(), ServerError>;

    /// Most recent first.
    fn list(&self) -> Result<Vec<SavedPortfolio>, ServerError>;

    /// Returns whether anything was removed.
    fn delete(&self, name: &str) -> Result<bool, ServerError>;
}
