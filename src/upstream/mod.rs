mod client;
pub mod models;
mod upstream_error;

pub use client::BridgeClient;
pub use models::{ParcelDetails, RawZestimate};
pub use upstream_error::UpstreamError;

use crate::domain::classify::AddressResolver;
use serde_json::Value;

/// What to ask the zestimates endpoint for.
#[derive(Debug, Clone, PartialEq)]
pub enum ZestimateQuery {
    /// One batch of ZPIDs (`zpid.in`).
    Zpids(Vec<String>),
    /// Properties around a point (`lon,lat`) or inside a postal code.
    Near { near: String, limit: u32 },
    /// Free-text address search.
    Address(String),
}

impl ZestimateQuery {
    pub fn near_point(latitude: f64, longitude: f64, limit: u32) -> Self {
        ZestimateQuery::Near {
            near: format!("{longitude},{latitude}"),
            limit,
        }
    }
}

/// The two upstream capabilities the service relies on.
pub trait ValuationApi: Send + Sync {
    fn zestimates(&self, query: &ZestimateQuery) -> Result<Vec<RawZestimate>, UpstreamError>;

    /// Raw parcel records, every upstream field kept.
    fn parcels(&self, zpids: &[String]) -> Result<Vec<Value>, UpstreamError>;
}

impl<T: ValuationApi + ?Sized> AddressResolver for T {
    fn resolve(&self, address: &str) -> Result<Vec<String>, UpstreamError> {
        let records = self.zestimates(&ZestimateQuery::Address(address.to_string()))?;

        let mut zpids: Vec<String> = Vec::new();
        for zpid in records.into_iter().filter_map(|r| r.zpid) {
            if !zpids.contains(&zpid) {
                zpids.push(zpid);
            }
        }
        Ok(zpids)
    }
}
