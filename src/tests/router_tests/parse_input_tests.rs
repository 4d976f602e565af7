// src/tests/router_tests/parse_input_tests.rs

use crate::router::{handle, respond};
use crate::tests::utils::{body_json, memory_state, post_json, zestimate_record, FakeValuationApi};
use serde_json::json;
use std::sync::Arc;

fn api() -> FakeValuationApi {
    let mut api = FakeValuationApi::with_properties([
        zestimate_record("44158191", 300_000.0, 2_000.0),
        zestimate_record("2000001", 150_000.0, 1_200.0),
    ]);
    api.set_address("123 Main St", &["2000001"]);
    api.fail_address("5 Broken Way");
    api
}

#[test]
fn mixed_input_is_classified() {
    let state = memory_state(Arc::new(api()));

    let resp = handle(
        post_json(
            "/parse-input",
            json!({ "input": "44158191, 123 Main St, , abc\n99 Nowhere Rd" }),
        ),
        &state,
    )
    .unwrap();
    let body = body_json(resp);

    assert_eq!(body["zpids"], json!(["44158191"]));
    assert_eq!(body["invalidEntries"], json!(["abc"]));
    assert_eq!(
        body["addressResults"],
        json!([
            { "address": "123 Main St", "found": true, "zpids": ["2000001"] },
            { "address": "99 Nowhere Rd", "found": false, "zpids": [] }
        ])
    );
    assert_eq!(body["totalPropertiesFound"], 2);
}

#[test]
fn missing_input_is_a_bad_request() {
    let state = memory_state(Arc::new(api()));

    let resp = respond(post_json("/parse-input", json!({})), &state);
    assert_eq!(resp.status(), 400);
}

#[test]
fn unresolved_addresses_never_reach_the_portfolio() {
    let state = memory_state(Arc::new(api()));

    let resp = handle(
        post_json(
            "/parse-input",
            json!({ "input": "99 Nowhere Rd\n5 Broken Way\n123 Main St" }),
        ),
        &state,
    )
    .unwrap();
    let classified = body_json(resp);

    let results = classified["addressResults"].as_array().unwrap();
    assert_eq!(results[0]["found"], false);
    assert_eq!(results[0]["zpids"], json!([]));
    assert_eq!(results[1]["address"], "5 Broken Way");
    assert_eq!(results[1]["found"], false);

    let zpids: Vec<serde_json::Value> = results
        .iter()
        .flat_map(|r| r["zpids"].as_array().cloned().unwrap_or_default())
        .collect();

    let resp = handle(post_json("/properties", json!({ "zpids": zpids })), &state).unwrap();
    let portfolio = body_json(resp);

    let fetched: Vec<&str> = portfolio["properties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["zpid"].as_str().unwrap())
        .collect();
    assert_eq!(fetched, vec!["2000001"]);
    assert!(!fetched.iter().any(|z| z.contains("Nowhere")));
}
