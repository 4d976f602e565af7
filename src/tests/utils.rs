use crate::db::connection::{init_db, Database};
use crate::state::AppState;
use crate::store::{MemoryPortfolioStore, SqlitePortfolioStore};
use crate::upstream::{RawZestimate, UpstreamError, ValuationApi, ZestimateQuery};
use astra::{Body, Request, Response};
use http::Method;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// In-memory stand-in for the valuation API.
#[derive(Default)]
pub struct FakeValuationApi {
    properties: Vec<Value>,
    parcels: Vec<Value>,
    nearby: Vec<Value>,
    zip_results: HashMap<String, Vec<Value>>,
    addresses: HashMap<String, Vec<String>>,
    failing_zpids: HashSet<String>,
    failing_addresses: HashSet<String>,
    parcels_down: bool,
    calls: Mutex<Vec<ZestimateQuery>>,
}

impl FakeValuationApi {
    pub fn with_properties(records: impl IntoIterator<Item = Value>) -> Self {
        Self {
            properties: records.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn set_nearby(&mut self, records: impl IntoIterator<Item = Value>) {
        self.nearby = records.into_iter().collect();
    }

    pub fn set_zip_results(&mut self, zip: &str, records: impl IntoIterator<Item = Value>) {
        self.zip_results
            .insert(zip.to_string(), records.into_iter().collect());
    }

    pub fn set_address(&mut self, address: &str, zpids: &[&str]) {
        self.addresses.insert(
            address.to_string(),
            zpids.iter().map(|z| z.to_string()).collect(),
        );
    }

    pub fn add_parcel(&mut self, zpid: &str, living_area: f64, beds: f64, baths: f64) {
        self.parcels.push(json!({
            "zpid": zpid,
            "BedroomsCount": beds,
            "BathroomsTotalCount": baths,
            "BuildingAreaSqFt": living_area,
            "YearBuilt": 1999,
            "PropertyTypeName": "Single Family",
            "APN": format!("APN-{zpid}")
        }));
    }

    /// Any zestimates batch containing this ZPID fails.
    pub fn fail_zpid(&mut self, zpid: &str) {
        self.failing_zpids.insert(zpid.to_string());
    }

    pub fn fail_address(&mut self, address: &str) {
        self.failing_addresses.insert(address.to_string());
    }

    pub fn fail_parcels(&mut self) {
        self.parcels_down = true;
    }

    /// Sizes of every `zpid.in` batch requested so far.
    pub fn zestimate_batches(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter_map(|q| match q {
                ZestimateQuery::Zpids(z) => Some(z.len()),
                _ => None,
            })
            .collect()
    }

    pub fn last_near_query(&self) -> Option<ZestimateQuery> {
        self.calls()
            .into_iter()
            .rev()
            .find(|q| matches!(q, ZestimateQuery::Near { .. }))
    }

    fn calls(&self) -> Vec<ZestimateQuery> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn decode(records: &[Value]) -> Result<Vec<RawZestimate>, UpstreamError> {
        records
            .iter()
            .map(|r| {
                serde_json::from_value(r.clone())
                    .map_err(|e| UpstreamError::UnexpectedShape(e.to_string()))
            })
            .collect()
    }
}

fn record_zpid(record: &Value) -> String {
    match &record["zpid"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ValuationApi for FakeValuationApi {
    fn zestimates(&self, query: &ZestimateQuery) -> Result<Vec<RawZestimate>, UpstreamError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }

        match query {
            ZestimateQuery::Zpids(zpids) => {
                if zpids.iter().any(|z| self.failing_zpids.contains(z)) {
                    return Err(UpstreamError::Status {
                        status: 503,
                        body: "service unavailable".into(),
                    });
                }
                let hits: Vec<Value> = self
                    .properties
                    .iter()
                    .filter(|r| zpids.contains(&record_zpid(r)))
                    .cloned()
                    .collect();
                Self::decode(&hits)
            }
            ZestimateQuery::Near { near, limit } => {
                let records = self.zip_results.get(near).unwrap_or(&self.nearby);
                let take = (*limit as usize).min(records.len());
                Self::decode(&records[..take])
            }
            ZestimateQuery::Address(address) => {
                if self.failing_addresses.contains(address) {
                    return Err(UpstreamError::Network("connection reset".into()));
                }
                let records: Vec<Value> = self
                    .addresses
                    .get(address)
                    .map(|zpids| zpids.iter().map(|z| json!({ "zpid": z })).collect())
                    .unwrap_or_default();
                Self::decode(&records)
            }
        }
    }

    fn parcels(&self, zpids: &[String]) -> Result<Vec<Value>, UpstreamError> {
        if self.parcels_down {
            return Err(UpstreamError::Network("parcels offline".into()));
        }
        Ok(self
            .parcels
            .iter()
            .filter(|p| zpids.contains(&record_zpid(p)))
            .cloned()
            .collect())
    }
}

pub fn zestimate_record(zpid: &str, zestimate: f64, rent: f64) -> Value {
    json!({
        "zpid": zpid,
        "address": format!("{zpid} Test St"),
        "zestimate": zestimate,
        "rentalZestimate": rent
    })
}

pub fn located_record(zpid: &str, zestimate: f64, rent: f64, lat: f64, lon: f64) -> Value {
    let mut record = zestimate_record(zpid, zestimate, rent);
    record["Latitude"] = json!(lat);
    record["Longitude"] = json!(lon);
    record
}

/// A fresh, schema-initialised SQLite file under the temp dir.
pub fn temp_db(label: &str) -> Database {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let path = std::env::temp_dir().join(format!(
        "caprate_{label}_{}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

pub fn memory_state(api: Arc<FakeValuationApi>) -> AppState {
    AppState::new(api, Arc::new(MemoryPortfolioStore::new()))
}

pub fn sqlite_state(api: Arc<FakeValuationApi>, label: &str) -> AppState {
    AppState::new(api, Arc::new(SqlitePortfolioStore::new(temp_db(label))))
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_string(resp)).expect("response is JSON")
}
