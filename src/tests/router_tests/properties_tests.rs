// src/tests/router_tests/properties_tests.rs

use crate::router::{handle, respond};
use crate::tests::utils::{
    body_json, memory_state, post_json, zestimate_record, FakeValuationApi,
};
use astra::{Body, Request};
use http::Method;
use serde_json::json;
use std::sync::Arc;

fn portfolio_api() -> FakeValuationApi {
    let mut api = FakeValuationApi::with_properties([
        zestimate_record("1111111", 100_000.0, 1_000.0),
        zestimate_record("2222222", 200_000.0, 1_000.0),
        zestimate_record("3333333", 0.0, 900.0),
    ]);
    api.add_parcel("1111111", 1_000.0, 3.0, 2.0);
    api
}

#[test]
fn properties_returns_summary_and_enriched_list() {
    let state = memory_state(Arc::new(portfolio_api()));

    let resp = handle(
        post_json(
            "/api/properties",
            json!({ "zpids": ["1111111", 2222222, "3333333", "7777777"] }),
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);

    let summary = &body["summary"];
    assert_eq!(summary["propertyCount"], 3);
    assert_eq!(summary["totalValue"], 300_000.0);
    assert_eq!(summary["totalRental"], 2_900.0);
    // Mean of 12% and 6%; the zero-valued property has no rate.
    assert!((summary["avgCapRate"].as_f64().unwrap() - 9.0).abs() < 1e-9);

    let properties = body["properties"].as_array().unwrap();
    assert_eq!(properties.len(), 3);

    let first = &properties[0];
    assert_eq!(first["zpid"], "1111111");
    assert_eq!(first["capRate"], 12.0);
    assert_eq!(first["bedrooms"], 3.0);
    assert_eq!(first["livingArea"], 1_000.0);
    assert_eq!(first["pricePerSqft"], 100.0);

    assert!(properties[2]["capRate"].is_null());
}

#[test]
fn a_failed_batch_does_not_sink_the_others() {
    let zpids: Vec<String> = (0..10).map(|i| format!("{}", 5_000_000 + i)).collect();
    let mut api = FakeValuationApi::with_properties(
        zpids.iter().map(|z| zestimate_record(z, 100_000.0, 1_000.0)),
    );
    // Lands in the second batch of eight.
    api.fail_zpid("5000009");
    let state = memory_state(Arc::new(api));

    let resp = handle(post_json("/properties", json!({ "zpids": zpids })), &state).unwrap();
    let body = body_json(resp);

    assert_eq!(body["summary"]["propertyCount"], 8);
}

#[test]
fn nothing_found_is_an_empty_portfolio() {
    let state = memory_state(Arc::new(portfolio_api()));

    let resp = handle(post_json("/properties", json!({ "zpids": ["9999999"] })), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["summary"]["propertyCount"], 0);
    assert_eq!(body["summary"]["avgCapRate"], 0.0);
    assert_eq!(body["properties"], json!([]));
}

#[test]
fn missing_or_empty_zpids_are_rejected() {
    let state = memory_state(Arc::new(portfolio_api()));

    for route in ["/properties", "/get-properties", "/get-parcel-data"] {
        assert_eq!(respond(post_json(route, json!({})), &state).status(), 400);
        assert_eq!(
            respond(post_json(route, json!({ "zpids": [] })), &state).status(),
            400
        );
    }
}

#[test]
fn malformed_json_is_a_bad_request() {
    let state = memory_state(Arc::new(portfolio_api()));

    let req: Request = http::Request::builder()
        .method(Method::POST)
        .uri("/properties")
        .body(Body::from("{not json".to_string()))
        .unwrap();

    let resp = respond(req, &state);
    assert_eq!(resp.status(), 400);
    assert!(body_json(resp)["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body"));
}

#[test]
fn get_properties_is_the_bare_list() {
    let state = memory_state(Arc::new(portfolio_api()));

    let resp = handle(
        post_json("/get-properties", json!({ "zpids": ["2222222", "1111111"] })),
        &state,
    )
    .unwrap();
    let body = body_json(resp);

    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().any(|p| p["zpid"] == "2222222"));
}

#[test]
fn parcel_data_passes_records_through() {
    let state = memory_state(Arc::new(portfolio_api()));

    let resp = handle(
        post_json("/get-parcel-data", json!({ "zpids": ["1111111"] })),
        &state,
    )
    .unwrap();
    let body = body_json(resp);

    assert_eq!(body[0]["zpid"], "1111111");
    assert_eq!(body[0]["APN"], "APN-1111111");

    let resp = respond(
        post_json("/get-parcel-data", json!({ "zpids": ["2222222"] })),
        &state,
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn unknown_route_is_not_found() {
    let state = memory_state(Arc::new(portfolio_api()));

    let resp = respond(post_json("/nope", json!({})), &state);
    assert_eq!(resp.status(), 404);
}
