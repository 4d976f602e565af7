// src/analysis/market.rs
use crate::analysis::nearby::clamp_limit;
use crate::domain::metrics::cap_rate;
use crate::errors::ServerError;
use crate::upstream::{UpstreamError, ValuationApi, ZestimateQuery};
use serde::Serialize;
use tracing::warn;

/// Optional valuation window a property must fall into to count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueBand {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueBand {
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipCapRate {
    pub zip: String,
    pub average_cap_rate: f64,
    pub property_count: usize,
}

/// Average cap rate per postal code, highest first.
///
/// Each postal code is one upstream search. A code whose search fails is
/// left out; if every search fails the last error is returned.
pub fn zip_cap_rates(
    api: &dyn ValuationApi,
    zips: &[String],
    band: ValueBand,
    limit: u32,
) -> Result<Vec<ZipCapRate>, ServerError> {
    let zips = validate_zips(zips)?;

    let mut out = Vec::new();
    let mut last_err: Option<UpstreamError> = None;

    for zip in &zips {
        let query = ZestimateQuery::Near {
            near: zip.clone(),
            limit: clamp_limit(limit),
        };

        match api.zestimates(&query) {
            Ok(records) => {
                let rates: Vec<f64> = records
                    .iter()
                    .filter_map(|r| {
                        let value = r.zestimate?;
                        let rent = r.rental_zestimate?;
                        band.contains(value).then(|| cap_rate(value, rent)).flatten()
                    })
                    .collect();

                let average_cap_rate = if rates.is_empty() {
                    0.0
                } else {
                    rates.iter().sum::<f64>() / rates.len() as f64
                };

                out.push(ZipCapRate {
                    zip: zip.clone(),
                    average_cap_rate,
                    property_count: rates.len(),
                });
            }
            Err(e) => {
                warn!("Skipping zip {zip}: {e}");
                last_err = Some(e);
            }
        }
    }

    if out.is_empty() {
        if let Some(e) = last_err {
            return Err(e.into());
        }
    }

    out.sort_by(|a, b| b.average_cap_rate.total_cmp(&a.average_cap_rate));
    Ok(out)
}

fn validate_zips(zips: &[String]) -> Result<Vec<String>, ServerError> {
    let mut out: Vec<String> = Vec::new();
    for zip in zips.iter().map(|z| z.trim()).filter(|z| !z.is_empty()) {
        if zip.len() != 5 || !zip.chars().all(|c| c.is_ascii_digit()) {
            return Err(ServerError::Validation(format!("Invalid postal code: {zip}")));
        }
        if !out.iter().any(|o| o == zip) {
            out.push(zip.to_string());
        }
    }

    if out.is_empty() {
        return Err(ServerError::Validation("At least one postal code is required".into()));
    }
    Ok(out)
}
