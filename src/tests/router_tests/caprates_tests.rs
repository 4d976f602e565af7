// src/tests/router_tests/caprates_tests.rs

use crate::router::{handle, respond};
use crate::tests::utils::{
    body_json, body_string, get, located_record, memory_state, zestimate_record,
    FakeValuationApi,
};
use std::sync::Arc;

const ORIGIN: &str = "1000001";

/// Origin at (34.0, -118.0) with three neighbours; the nearby search also
/// echoes the origin back.
fn neighbourhood() -> FakeValuationApi {
    let mut api = FakeValuationApi::with_properties([
        located_record(ORIGIN, 500_000.0, 3_000.0, 34.0, -118.0),
        zestimate_record("2000002", 1.0, 1.0),
    ]);
    api.set_nearby([
        located_record(ORIGIN, 500_000.0, 3_000.0, 34.0, -118.0),
        zestimate_record("1000002", 100_000.0, 1_000.0),
        zestimate_record("1000003", 0.0, 1_500.0),
        zestimate_record("1000004", 200_000.0, 2_500.0),
    ]);
    api
}

#[test]
fn caprates_are_sorted_and_exclude_the_origin() {
    let api = Arc::new(neighbourhood());
    let state = memory_state(api.clone());

    let resp = handle(get("/caprates?zpid=1000001"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let rows = body_json(resp);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["zpid"], "1000004");
    assert_eq!(rows[0]["capRate"], "15.00%");
    assert_eq!(rows[1]["zpid"], "1000002");
    assert_eq!(rows[1]["capRate"], "12.00%");
    assert_eq!(rows[1]["address"], "1000002 Test St");
    assert_eq!(rows[1]["zestimate"], 100_000.0);
    assert_eq!(rows[1]["rentalZestimate"], 1_000.0);
    // Zero valuation has no cap rate, and sorts last.
    assert_eq!(rows[2]["zpid"], "1000003");
    assert!(rows[2]["capRate"].is_null());

    assert!(rows.iter().all(|r| r["zpid"] != ORIGIN));
}

#[test]
fn near_search_is_centred_on_the_origin() {
    let api = Arc::new(neighbourhood());
    let state = memory_state(api.clone());

    handle(get("/api/caprates?zpid=1000001&limit=25"), &state).unwrap();

    assert_eq!(
        api.last_near_query(),
        Some(crate::upstream::ZestimateQuery::Near {
            near: "-118,34".into(),
            limit: 25
        })
    );
}

#[test]
fn missing_zpid_is_a_bad_request() {
    let state = memory_state(Arc::new(neighbourhood()));

    let resp = respond(get("/caprates"), &state);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "zpid is required");

    let resp = respond(get("/caprates?zpid=%20"), &state);
    assert_eq!(resp.status(), 400);
}

#[test]
fn unknown_origin_is_not_found() {
    let state = memory_state(Arc::new(neighbourhood()));

    let resp = respond(get("/caprates?zpid=9999999"), &state);
    assert_eq!(resp.status(), 404);
}

#[test]
fn origin_without_coordinates_is_a_bad_request() {
    let state = memory_state(Arc::new(neighbourhood()));

    let resp = respond(get("/caprates?zpid=2000002"), &state);
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("Latitude and longitude not found"));
}

#[test]
fn upstream_failure_is_generic() {
    let mut api = neighbourhood();
    api.fail_zpid(ORIGIN);
    let state = memory_state(Arc::new(api));

    let resp = respond(get("/caprates?zpid=1000001"), &state);
    assert_eq!(resp.status(), 500);

    let body = body_string(resp);
    assert!(body.contains("Upstream valuation service failed"));
    assert!(!body.contains("service unavailable"));
}

#[test]
fn caprates_export_is_a_workbook() {
    let state = memory_state(Arc::new(neighbourhood()));

    let resp = handle(get("/caprates/export?zpid=1000001"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["Content-Disposition"],
        "attachment; filename=\"caprates_1000001.xlsx\""
    );

    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut resp.into_body().reader(), &mut bytes).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn zip_averages_respect_the_value_band() {
    let mut api = FakeValuationApi::default();
    api.set_zip_results(
        "90210",
        [
            zestimate_record("1", 100_000.0, 1_000.0),
            zestimate_record("2", 200_000.0, 1_000.0),
            zestimate_record("3", 900_000.0, 1_000.0),
        ],
    );
    api.set_zip_results("10001", [zestimate_record("4", 100_000.0, 2_000.0)]);
    let state = memory_state(Arc::new(api));

    let resp = handle(
        get("/caprates/zip?zips=90210,10001&min_value=50000&max_value=250000"),
        &state,
    )
    .unwrap();
    let rows = body_json(resp);

    assert_eq!(rows[0]["zip"], "10001");
    assert_eq!(rows[0]["propertyCount"], 1);
    assert_eq!(rows[1]["zip"], "90210");
    assert_eq!(rows[1]["propertyCount"], 2);
    let avg = rows[1]["averageCapRate"].as_f64().unwrap();
    assert!((avg - 9.0).abs() < 1e-9);
}

#[test]
fn zip_band_must_be_numeric() {
    let state = memory_state(Arc::new(FakeValuationApi::default()));

    let resp = respond(get("/caprates/zip?zips=90210&min_value=cheap"), &state);
    assert_eq!(resp.status(), 400);
}
