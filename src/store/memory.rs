use crate::errors::ServerError;
use crate::store::{PortfolioStore, SavedPortfolio};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Saved searches keep only the ten most recent entries.
pub const SAVED_SEARCH_LIMIT: usize = 10;

/// In-process store with saved-search semantics: newest first, capped.
pub struct MemoryPortfolioStore {
    entries: Mutex<VecDeque<SavedPortfolio>>,
    capacity: usize,
}

impl MemoryPortfolioStore {
    pub fn new() -> Self {
        Self::with_capacity(SAVED_SEARCH_LIMIT)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    fn entries(&self) -> Result<MutexGuard<'_, VecDeque<SavedPortfolio>>, ServerError> {
        self.entries.lock().map_err(|_| ServerError::InternalError)
    }
}

impl Default for MemoryPortfolioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioStore for MemoryPortfolioStore {
    fn load(&self, name: &str) -> Result<Option<SavedPortfolio>, ServerError> {
        Ok(self.entries()?.iter().find(|p| p.name == name).cloned())
    }

    fn save(&self, entry: SavedPortfolio) -> Result<(), ServerError> {
        let mut entries = self.entries()?;
        entries.retain(|p| p.name != entry.name);
        entries.push_front(entry);
        entries.truncate(self.capacity);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SavedPortfolio>, ServerError> {
        Ok(self.entries()?.iter().cloned().collect())
    }

    fn delete(&self, name: &str) -> Result<bool, ServerError> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|p| p.name != name);
        Ok(entries.len() != before)
    }
}
