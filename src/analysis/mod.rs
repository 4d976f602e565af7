pub mod fetcher;
pub mod market;
pub mod nearby;
pub mod portfolio;

pub use fetcher::{fetch_parcel_records, fetch_properties};
pub use market::{zip_cap_rates, ValueBand};
pub use nearby::{cap_rate_rows, find_nearby};
pub use portfolio::{analyze, PortfolioAnalysis};
