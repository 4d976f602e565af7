// src/analysis/nearby.rs
use crate::analysis::fetcher::build_properties;
use crate::domain::metrics::format_percent;
use crate::domain::{Coordinates, Property};
use crate::errors::ServerError;
use crate::upstream::{ValuationApi, ZestimateQuery};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::info;

/// Upper bound the upstream accepts for a `near` search.
pub const MAX_NEARBY_LIMIT: u32 = 200;

pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_NEARBY_LIMIT)
}

/// Looks up the origin's coordinates.
pub fn locate(api: &dyn ValuationApi, zpid: &str) -> Result<Coordinates, ServerError> {
    let zpid = zpid.trim();
    if zpid.is_empty() {
        return Err(ServerError::Validation("ZPID is required".into()));
    }

    let records = api.zestimates(&ZestimateQuery::Zpids(vec![zpid.to_string()]))?;
    let origin = records
        .iter()
        .find(|r| r.zpid.as_deref() == Some(zpid))
        .ok_or_else(|| ServerError::NotFound(format!("No property found for ZPID {zpid}")))?;

    Coordinates::from_parts(origin.latitude, origin.longitude).ok_or_else(|| {
        ServerError::NotLocated(format!("Latitude and longitude not found for ZPID {zpid}"))
    })
}

/// Properties around `origin_zpid`, each with derived metrics.
///
/// The origin itself is always removed from the result, matched on ZPID.
/// With `enrich` set, parcel details are merged in as well.
pub fn find_nearby(
    api: &dyn ValuationApi,
    origin_zpid: &str,
    limit: u32,
    enrich: bool,
) -> Result<Vec<Property>, ServerError> {
    let origin = locate(api, origin_zpid)?;
    let query = ZestimateQuery::near_point(origin.latitude, origin.longitude, clamp_limit(limit));

    let raws: Vec<_> = api
        .zestimates(&query)?
        .into_iter()
        .filter(|r| r.zpid.as_deref() != Some(origin_zpid.trim()))
        .collect();

    info!("Found {} properties near {}", raws.len(), origin_zpid.trim());

    if enrich {
        return Ok(build_properties(api, &raws));
    }
    Ok(raws
        .iter()
        .filter_map(|raw| Property::from_upstream(raw, None))
        .collect())
}

/// One line of the cap-rate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapRateRow {
    pub zpid: String,
    pub address: String,
    pub zestimate: f64,
    pub rental_zestimate: f64,
    /// `"<n>%"`, or null when the valuation is 0.
    pub cap_rate: Option<String>,
}

/// Highest cap rate first; undefined rates sink to the bottom.
pub fn cap_rate_rows(properties: &[Property]) -> Vec<CapRateRow> {
    let mut sorted: Vec<&Property> = properties.iter().collect();
    sorted.sort_by(|a, b| compare_cap_rates(a.cap_rate, b.cap_rate));

    sorted
        .into_iter()
        .map(|p| CapRateRow {
            zpid: p.zpid.clone(),
            address: p.address.clone().unwrap_or_default(),
            zestimate: p.valuation,
            rental_zestimate: p.monthly_rent,
            cap_rate: p.cap_rate.map(format_percent),
        })
        .collect()
}

fn compare_cap_rates(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
