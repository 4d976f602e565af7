// client.rs
use crate::upstream::models::{Envelope, RawZestimate};
use crate::upstream::{UpstreamError, ValuationApi, ZestimateQuery};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("caprate_portfolio/", env!("CARGO_PKG_VERSION"));

const ZESTIMATES_PATH: &str = "zestimates_v2/zestimates";
const PARCELS_PATH: &str = "pub/parcels";

/// Blocking client for the Bridge valuation API.
pub struct BridgeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BridgeClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(UpstreamError::Config("API key is empty".into()));
        }

        let base_url = url::Url::parse(base_url)
            .map_err(|e| UpstreamError::Config(format!("invalid upstream URL {base_url}: {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn get_bundle(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path);
        let start = Instant::now();

        let resp = self
            .client
            .get(&url)
            .query(&[("access_token", self.api_key.as_str())])
            .query(params)
            .send()
            .map_err(|e| UpstreamError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| UpstreamError::Network(e.without_url().to_string()))?;

        debug!(
            path,
            ?params,
            status = status.as_u16(),
            elapsed = ?start.elapsed(),
            "upstream call"
        );

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: Envelope = serde_json::from_str(&text)
            .map_err(|e| UpstreamError::UnexpectedShape(format!("{path}: {e}")))?;

        Ok(envelope.bundle.unwrap_or_default())
    }
}

impl ValuationApi for BridgeClient {
    fn zestimates(&self, query: &ZestimateQuery) -> Result<Vec<RawZestimate>, UpstreamError> {
        let params = match query {
            ZestimateQuery::Zpids(zpids) => vec![("zpid.in", zpids.join(","))],
            ZestimateQuery::Near { near, limit } => {
                vec![("near", near.clone()), ("limit", limit.to_string())]
            }
            ZestimateQuery::Address(address) => vec![("address", address.clone())],
        };

        let records = self.get_bundle(ZESTIMATES_PATH, &params)?;

        Ok(records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<RawZestimate>(record) {
                Ok(raw) if raw.zpid.is_some() => Some(raw),
                Ok(_) => {
                    warn!("Skipping zestimate record without a zpid");
                    None
                }
                Err(e) => {
                    warn!("Skipping malformed zestimate record: {e}");
                    None
                }
            })
            .collect())
    }

    fn parcels(&self, zpids: &[String]) -> Result<Vec<Value>, UpstreamError> {
        self.get_bundle(PARCELS_PATH, &[("zpid.in", zpids.join(","))])
    }
}
