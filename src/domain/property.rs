// src/domain/property.rs

use crate::domain::metrics::{cap_rate, net_cap_rate, price_per_area};
use crate::upstream::{ParcelDetails, RawZestimate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Both halves or nothing.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// One valuation record, built once per request from upstream data and never
/// changed afterwards. Derived metrics are computed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub zpid: String,
    pub address: Option<String>,
    #[serde(flatten)]
    pub coordinates: Option<Coordinates>,

    #[serde(rename = "zestimate")]
    pub valuation: f64,
    #[serde(rename = "rentalZestimate")]
    pub monthly_rent: f64,

    pub cap_rate: Option<f64>,
    pub net_cap_rate: Option<f64>,
    #[serde(rename = "pricePerSqft")]
    pub price_per_sqft: Option<f64>,

    // Pass-through descriptive fields
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub living_area: Option<f64>,
    pub lot_size: Option<f64>,
    pub year_built: Option<i32>,
    pub property_type: Option<String>,
    pub last_sale_price: Option<f64>,
    pub last_sale_date: Option<String>,
}

impl Property {
    /// Flattens an upstream zestimate (plus its parcel record, when one was
    /// found) into a `Property`. Records without a ZPID are rejected.
    pub fn from_upstream(raw: &RawZestimate, details: Option<&ParcelDetails>) -> Option<Self> {
        let zpid = raw.zpid.clone()?;

        // Missing or negative money fields count as 0.
        let valuation = raw.zestimate.unwrap_or(0.0).max(0.0);
        let monthly_rent = raw.rental_zestimate.unwrap_or(0.0).max(0.0);

        let details = details.cloned().unwrap_or_default();

        Some(Property {
            zpid,
            address: raw.address.clone(),
            coordinates: Coordinates::from_parts(raw.latitude, raw.longitude),
            valuation,
            monthly_rent,
            cap_rate: cap_rate(valuation, monthly_rent),
            net_cap_rate: net_cap_rate(valuation, monthly_rent),
            price_per_sqft: price_per_area(valuation, details.living_area),
            bedrooms: details.bedrooms,
            bathrooms: details.bathrooms,
            living_area: details.living_area,
            lot_size: details.lot_size,
            year_built: details.year_built.map(|y| y.round() as i32),
            property_type: details.property_type,
            last_sale_price: details.last_sale_price,
            last_sale_date: details.last_sale_date,
        })
    }

    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or("N/A")
    }
}
