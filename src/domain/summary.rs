// src/domain/summary.rs

use crate::domain::property::Property;
use serde::Serialize;

/// Aggregate figures over one analyzed portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_rental: f64,
    /// Mean of the per-property cap rates, not the rate of the totals.
    pub avg_cap_rate: f64,
    pub property_count: usize,
    pub total_sqft: f64,
    pub avg_price_per_sqft: f64,
    pub total_bedrooms: f64,
    pub total_bathrooms: f64,
}

/// Summarises a list of properties.
///
/// Missing numeric fields count as 0 in every sum. Properties without a
/// defined cap rate (valuation of 0) are left out of the average. Each sum is
/// taken over sorted values, so the result does not depend on input order.
pub fn aggregate(properties: &[Property]) -> PortfolioSummary {
    let total_value = ordered_sum(properties.iter().map(|p| p.valuation));
    let total_rental = ordered_sum(properties.iter().map(|p| p.monthly_rent));
    let total_sqft = ordered_sum(properties.iter().map(|p| p.living_area.unwrap_or(0.0)));

    let cap_rates: Vec<f64> = properties.iter().filter_map(|p| p.cap_rate).collect();
    let avg_cap_rate = if cap_rates.is_empty() {
        0.0
    } else {
        ordered_sum(cap_rates.iter().copied()) / cap_rates.len() as f64
    };

    let avg_price_per_sqft = if total_sqft > 0.0 {
        total_value / total_sqft
    } else {
        0.0
    };

    PortfolioSummary {
        total_value,
        total_rental,
        avg_cap_rate,
        property_count: properties.len(),
        total_sqft,
        avg_price_per_sqft,
        total_bedrooms: ordered_sum(properties.iter().map(|p| p.bedrooms.unwrap_or(0.0))),
        total_bathrooms: ordered_sum(properties.iter().map(|p| p.bathrooms.unwrap_or(0.0))),
    }
}

fn ordered_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}
