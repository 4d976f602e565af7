// src/analysis/portfolio.rs
use crate::analysis::fetcher::fetch_properties;
use crate::domain::{aggregate, PortfolioSummary, Property};
use crate::errors::ServerError;
use crate::upstream::ValuationApi;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioAnalysis {
    pub summary: PortfolioSummary,
    pub properties: Vec<Property>,
}

/// Fetches the ZPIDs and summarises whatever came back.
pub fn analyze(
    api: &dyn ValuationApi,
    zpids: &[String],
) -> Result<PortfolioAnalysis, ServerError> {
    let properties = fetch_properties(api, zpids)?;
    let summary = aggregate(&properties);

    info!(
        "Analyzed portfolio: {} of {} zpids resolved",
        summary.property_count,
        zpids.len()
    );

    Ok(PortfolioAnalysis {
        summary,
        properties,
    })
}
