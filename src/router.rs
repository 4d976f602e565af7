use crate::analysis::{
    analyze, cap_rate_rows, fetch_parcel_records, fetch_properties, find_nearby, zip_cap_rates,
    PortfolioAnalysis, ValueBand,
};
use crate::domain::classify;
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, json_error_response, json_message, json_response};
use crate::spreadsheets::export_caprates_xlsx;
use crate::state::AppState;
use crate::store::SavedPortfolio;
use crate::templates::{self, html_error_response};
use astra::{Request, Response};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};
use url::form_urlencoded;

/// Routes that render HTML and so answer errors with an HTML page.
const PAGE_ROUTES: [&str; 3] = ["/", "/dashboard", "/nearby"];

#[derive(Deserialize)]
struct ZpidsBody {
    #[serde(default, deserialize_with = "crate::upstream::models::zpid_list")]
    zpids: Vec<String>,
}

#[derive(Deserialize)]
struct InputBody {
    input: Option<String>,
}

#[derive(Deserialize)]
struct SaveBody {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "crate::upstream::models::zpid_list")]
    zpids: Vec<String>,
}

#[derive(Deserialize)]
struct NameBody {
    #[serde(default)]
    name: String,
}

#[derive(Serialize)]
struct LoadedPortfolio {
    name: String,
    #[serde(flatten)]
    analysis: PortfolioAnalysis,
}

/// Entry point for the server loop: never fails, errors become responses.
pub fn respond(req: Request, state: &AppState) -> Response {
    let is_page = PAGE_ROUTES.contains(&api_path(req.uri().path()));

    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) if is_page => html_error_response(err),
        Err(err) => json_error_response(err),
    }
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = api_path(req.uri().path()).to_owned();
    let query = parse_query(&req);

    debug!("{method} {path}");

    match (method.as_str(), path.as_str()) {
        // Pages
        ("GET", "/") => html_response(templates::pages::home_page(&state.store.list()?)),
        ("GET", "/dashboard") => dashboard(state, &query),
        ("GET", "/nearby") => {
            let zpid = required(&query, "zpid")?;
            let properties = find_nearby(state.api.as_ref(), zpid, state.nearby_limit, true)?;
            html_response(templates::pages::nearby_page(zpid, &properties))
        }

        // Cap rates around a property
        ("GET", "/caprates") => {
            let zpid = required(&query, "zpid")?;
            let limit = optional_number::<u32>(&query, "limit")?.unwrap_or(state.nearby_limit);
            let properties = find_nearby(state.api.as_ref(), zpid, limit, false)?;
            json_response(200, &cap_rate_rows(&properties))
        }
        ("GET", "/caprates/export") => {
            let zpid = required(&query, "zpid")?;
            let properties = find_nearby(state.api.as_ref(), zpid, state.nearby_limit, false)?;
            export_caprates_xlsx(&cap_rate_rows(&properties), zpid.trim())
        }
        ("GET", "/caprates/zip") => {
            let zips: Vec<String> = required(&query, "zips")?
                .split(',')
                .map(|z| z.trim().to_string())
                .filter(|z| !z.is_empty())
                .collect();
            let band = ValueBand {
                min: optional_number::<f64>(&query, "min_value")?,
                max: optional_number::<f64>(&query, "max_value")?,
            };
            let averages = zip_cap_rates(state.api.as_ref(), &zips, band, state.nearby_limit)?;
            json_response(200, &averages)
        }

        // Portfolio analysis
        ("POST", "/properties") => {
            let body: ZpidsBody = read_json(&mut req)?;
            let zpids = non_empty(body.zpids)?;
            json_response(200, &analyze(state.api.as_ref(), &zpids)?)
        }
        ("POST", "/get-properties") => {
            let body: ZpidsBody = read_json(&mut req)?;
            let zpids = non_empty(body.zpids)?;
            json_response(200, &fetch_properties(state.api.as_ref(), &zpids)?)
        }
        ("POST", "/get-parcel-data") => {
            let body: ZpidsBody = read_json(&mut req)?;
            let zpids = non_empty(body.zpids)?;
            let records = fetch_parcel_records(state.api.as_ref(), &zpids)?;
            if records.is_empty() {
                return Err(ServerError::NotFound(
                    "No parcel data found for the given ZPIDs".into(),
                ));
            }
            json_response(200, &records)
        }
        ("POST", "/parse-input") => {
            let body: InputBody = read_json(&mut req)?;
            let input = body
                .input
                .ok_or_else(|| ServerError::Validation("input is required".into()))?;
            json_response(200, &classify(&input, state.api.as_ref()))
        }
        ("GET", p) if p.starts_with("/nearby-properties/") => {
            let zpid = path_param(p, "/nearby-properties/")?;
            let properties = find_nearby(state.api.as_ref(), &zpid, state.nearby_limit, true)?;
            json_response(200, &properties)
        }

        // Saved portfolios
        ("GET", "/get-portfolios") => json_response(200, &state.store.list()?),
        ("POST", "/save-portfolio") => {
            let body: SaveBody = read_json(&mut req)?;
            let entry = SavedPortfolio::new(&body.name, &body.zpids, chrono::Utc::now())?;
            if entry.zpids.is_empty() {
                return Err(ServerError::Validation("At least one ZPID is required".into()));
            }
            info!("Saving portfolio '{}' ({} zpids)", entry.name, entry.zpids.len());
            state.store.save(entry)?;
            json_message("Portfolio saved")
        }
        ("POST", "/delete-portfolio") => {
            let body: NameBody = read_json(&mut req)?;
            let name = body.name.trim();
            if name.is_empty() {
                return Err(ServerError::Validation("Portfolio name is required".into()));
            }
            if !state.store.delete(name)? {
                return Err(ServerError::NotFound(format!("No saved portfolio named '{name}'")));
            }
            json_message("Portfolio deleted")
        }
        ("GET", p) if p.starts_with("/load-portfolio/") => {
            let name = path_param(p, "/load-portfolio/")?;
            let saved = state
                .store
                .load(&name)?
                .ok_or_else(|| {
                    ServerError::NotFound(format!("No saved portfolio named '{name}'"))
                })?;
            let analysis = analyze(state.api.as_ref(), &saved.zpids)?;
            json_response(
                200,
                &LoadedPortfolio {
                    name: saved.name,
                    analysis,
                },
            )
        }

        _ => Err(ServerError::NotFound(format!("No route for {method} {path}"))),
    }
}

fn dashboard(state: &AppState, query: &HashMap<String, String>) -> ResultResp {
    let input = required(query, "input")?;
    let classified = classify(input, state.api.as_ref());
    let analysis = analyze(state.api.as_ref(), &classified.unified_zpids())?;
    html_response(templates::pages::dashboard_page(input, &classified, &analysis))
}

// `/api/x` and `/x` are the same route.
fn api_path(path: &str) -> &str {
    match path.strip_prefix("/api") {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn required<'a>(query: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ServerError> {
    query
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::Validation(format!("{key} is required")))
}

fn optional_number<T: std::str::FromStr>(
    query: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ServerError> {
    match query.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ServerError::Validation(format!("{key} must be a number"))),
    }
}

fn path_param(path: &str, prefix: &str) -> Result<String, ServerError> {
    let raw = path.strip_prefix(prefix).unwrap_or_default();
    // Only an unescaped `/` ends the segment; `%2F` belongs to the value.
    if raw.contains('/') {
        return Err(ServerError::NotFound(format!("No route for {path}")));
    }

    let value = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| ServerError::Validation("Path parameter is not valid UTF-8".into()))?;
    let value = value.trim();

    if value.is_empty() {
        return Err(ServerError::Validation("Path parameter is required".into()));
    }
    Ok(value.to_string())
}

fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    serde_json::from_reader(req.body_mut().reader())
        .map_err(|e| ServerError::Validation(format!("Invalid JSON body: {e}")))
}

fn non_empty(zpids: Vec<String>) -> Result<Vec<String>, ServerError> {
    if zpids.is_empty() {
        return Err(ServerError::Validation("zpids must be a non-empty list".into()));
    }
    Ok(zpids)
}
