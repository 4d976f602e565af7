use crate::db::{portfolios, Database};
use crate::errors::ServerError;
use crate::store::{PortfolioStore, SavedPortfolio};

/// Server-side persistence in the `portfolios` table. Uncapped.
pub struct SqlitePortfolioStore {
    db: Database,
}

impl SqlitePortfolioStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PortfolioStore for SqlitePortfolioStore {
    fn load(&self, name: &str) -> Result<Option<SavedPortfolio>, ServerError> {
        self.db.with_conn(|conn| portfolios::get_portfolio(conn, name))
    }

    fn save(&self, entry: SavedPortfolio) -> Result<(), ServerError> {
        self.db.with_conn(|conn| portfolios::upsert_portfolio(conn, &entry))
    }

    fn list(&self) -> Result<Vec<SavedPortfolio>, ServerError> {
        self.db.with_conn(|conn| portfolios::list_portfolios(conn))
    }

    fn delete(&self, name: &str) -> Result<bool, ServerError> {
        self.db.with_conn(|conn| portfolios::delete_portfolio(conn, name))
    }
}
