use crate::analysis::nearby::{clamp_limit, MAX_NEARBY_LIMIT};
use crate::store::PortfolioStore;
use crate::upstream::ValuationApi;
use std::sync::Arc;

/// Everything a request handler needs, shared read-only across workers.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ValuationApi>,
    pub store: Arc<dyn PortfolioStore>,
    /// Default size of a nearby search when the request names none.
    pub nearby_limit: u32,
}

impl AppState {
    pub fn new(api: Arc<dyn ValuationApi>, store: Arc<dyn PortfolioStore>) -> Self {
        Self {
            api,
            store,
            nearby_limit: MAX_NEARBY_LIMIT,
        }
    }

    pub fn with_nearby_limit(mut self, limit: u32) -> Self {
        self.nearby_limit = clamp_limit(limit);
        self
    }
}
