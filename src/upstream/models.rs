use serde::{Deserialize, Deserializer};
use serde_json::Value;

// zestimates_v2/zestimates
//  └── bundle[]
//       ├── zpid              (number or string)
//       ├── address
//       ├── zestimate
//       ├── rentalZestimate
//       ├── Latitude
//       └── Longitude
//
// pub/parcels
//  └── bundle[]
//       ├── zpid
//       ├── BedroomsCount / BathroomsTotalCount
//       ├── BuildingAreaSqFt / LotSizeSquareFeet
//       ├── YearBuilt
//       ├── PropertyTypeName
//       └── ListPrice / CloseDate

#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub bundle: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawZestimate {
    #[serde(default, deserialize_with = "lenient_id")]
    pub zpid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub zestimate: Option<f64>,
    #[serde(
        default,
        rename = "rentalZestimate",
        deserialize_with = "lenient_f64"
    )]
    pub rental_zestimate: Option<f64>,
    #[serde(
        default,
        rename = "Latitude",
        alias = "latitude",
        deserialize_with = "lenient_f64"
    )]
    pub latitude: Option<f64>,
    #[serde(
        default,
        rename = "Longitude",
        alias = "longitude",
        deserialize_with = "lenient_f64"
    )]
    pub longitude: Option<f64>,
}

/// Descriptive attributes merged into a property from its parcel record.
/// The aliases cover the field names of the `pub/properties` dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParcelDetails {
    #[serde(default, deserialize_with = "lenient_id")]
    pub zpid: Option<String>,
    #[serde(
        default,
        rename = "BedroomsCount",
        alias = "BedroomsTotal",
        deserialize_with = "lenient_f64"
    )]
    pub bedrooms: Option<f64>,
    #[serde(
        default,
        rename = "BathroomsTotalCount",
        alias = "BathroomsTotalInteger",
        deserialize_with = "lenient_f64"
    )]
    pub bathrooms: Option<f64>,
    #[serde(
        default,
        rename = "BuildingAreaSqFt",
        alias = "BuildingAreaTotal",
        deserialize_with = "lenient_f64"
    )]
    pub living_area: Option<f64>,
    #[serde(
        default,
        rename = "LotSizeSquareFeet",
        deserialize_with = "lenient_f64"
    )]
    pub lot_size: Option<f64>,
    #[serde(default, rename = "YearBuilt", deserialize_with = "lenient_f64")]
    pub year_built: Option<f64>,
    #[serde(
        default,
        rename = "PropertyTypeName",
        alias = "PropertyType",
        deserialize_with = "lenient_string"
    )]
    pub property_type: Option<String>,
    #[serde(default, rename = "ListPrice", deserialize_with = "lenient_f64")]
    pub last_sale_price: Option<f64>,
    #[serde(default, rename = "CloseDate", deserialize_with = "lenient_string")]
    pub last_sale_date: Option<String>,
}

impl ParcelDetails {
    pub fn from_record(record: &Value) -> Option<Self> {
        serde_json::from_value(record.clone()).ok()
    }
}

/// Numbers and numeric strings become `f64`; everything else is absent.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|f| f.is_finite())
}

/// ZPIDs arrive as integers or strings; both normalise to a trimmed string.
pub fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_id))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Request bodies carry ZPIDs as strings or integers.
pub fn zpid_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.iter().filter_map(coerce_id).collect())
}
