// src/analysis/fetcher.rs
use crate::domain::Property;
use crate::upstream::{ParcelDetails, RawZestimate, UpstreamError, ValuationApi, ZestimateQuery};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// ZPIDs per zestimates call.
pub const ZESTIMATE_BATCH_SIZE: usize = 8;
/// ZPIDs per parcels call.
pub const PARCEL_BATCH_SIZE: usize = 5;

/// Trims, drops blanks, and keeps the first occurrence of each ZPID.
pub fn dedupe_zpids(zpids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for zpid in zpids.iter().map(|z| z.trim()).filter(|z| !z.is_empty()) {
        if !out.iter().any(|o| o == zpid) {
            out.push(zpid.to_string());
        }
    }
    out
}

/// Fetches, enriches and derives metrics for a batch of ZPIDs.
///
/// ZPIDs the upstream does not know are simply absent from the result. A
/// failed chunk is logged and skipped; only when every chunk fails does the
/// error reach the caller.
pub fn fetch_properties(
    api: &dyn ValuationApi,
    zpids: &[String],
) -> Result<Vec<Property>, UpstreamError> {
    let zpids = dedupe_zpids(zpids);

    let raws = fetch_in_chunks(&zpids, ZESTIMATE_BATCH_SIZE, |chunk| {
        api.zestimates(&ZestimateQuery::Zpids(chunk.to_vec()))
    })?;

    // The upstream may echo a ZPID twice across chunks.
    let mut seen: Vec<&str> = Vec::new();
    let unique: Vec<RawZestimate> = raws
        .iter()
        .filter(|r| match r.zpid.as_deref() {
            Some(z) if zpids.iter().any(|want| want == z) && !seen.contains(&z) => {
                seen.push(z);
                true
            }
            _ => false,
        })
        .cloned()
        .collect();

    Ok(build_properties(api, &unique))
}

/// Turns raw zestimates into properties, merging parcel details when the
/// parcel lookup succeeds.
pub fn build_properties(api: &dyn ValuationApi, raws: &[RawZestimate]) -> Vec<Property> {
    let zpids: Vec<String> = raws.iter().filter_map(|r| r.zpid.clone()).collect();
    let details = fetch_parcel_details(api, &zpids);

    raws.iter()
        .filter_map(|raw| {
            let parcel = raw.zpid.as_ref().and_then(|z| details.get(z));
            Property::from_upstream(raw, parcel)
        })
        .collect()
}

/// Best effort: any failure just leaves properties unenriched.
pub fn fetch_parcel_details(
    api: &dyn ValuationApi,
    zpids: &[String],
) -> HashMap<String, ParcelDetails> {
    let records = match fetch_parcel_records(api, zpids) {
        Ok(records) => records,
        Err(e) => {
            warn!("Parcel enrichment unavailable: {e}");
            return HashMap::new();
        }
    };

    records
        .iter()
        .filter_map(ParcelDetails::from_record)
        .filter_map(|d| d.zpid.clone().map(|z| (z, d)))
        .collect()
}

/// Raw parcel records for `zpids`, chunked like every other batch call.
pub fn fetch_parcel_records(
    api: &dyn ValuationApi,
    zpids: &[String],
) -> Result<Vec<Value>, UpstreamError> {
    let zpids = dedupe_zpids(zpids);
    fetch_in_chunks(&zpids, PARCEL_BATCH_SIZE, |chunk| api.parcels(chunk))
}

fn fetch_in_chunks<T, F>(
    zpids: &[String],
    size: usize,
    mut fetch: F,
) -> Result<Vec<T>, UpstreamError>
where
    F: FnMut(&[String]) -> Result<Vec<T>, UpstreamError>,
{
    let mut out = Vec::new();
    let mut last_err = None;
    let mut succeeded = 0;

    for chunk in zpids.chunks(size) {
        match fetch(chunk) {
            Ok(mut records) => {
                debug!("Fetched {} records for {} zpids", records.len(), chunk.len());
                succeeded += 1;
                out.append(&mut records);
            }
            Err(e) => {
                warn!("Skipping chunk {chunk:?}: {e}");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(e) if succeeded == 0 => Err(e),
        _ => Ok(out),
    }
}
