// src/tests/router_tests/api_tests.rs
use crate::db::Database;
use crate::geo::GeoBucketService;
use crate::router::handle;
use crate::tests::utils::init_test_db;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::{json, Value};
use std::io::Read;

fn body_json(resp: Response) -> Value {
    let mut body = resp.into_body();
    let mut text = String::new();
    body.reader().read_to_string(&mut text).unwrap();
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("bad json {text:?}: {e}"))
}

fn get(db: &Database, svc: &GeoBucketService, uri: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    handle(req, db, svc).expect("Handler failed")
}

fn post_json(db: &Database, svc: &GeoBucketService, uri: &str, payload: &Value) -> Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    handle(req, db, svc).expect("Handler failed")
}

fn property(title: &str, location: &str, lat: f64, lng: f64) -> Value {
    json!({
        "title": title,
        "location_name": location,
        "lat": lat,
        "lng": lng,
        "price": 2500000,
        "bedrooms": 3,
        "bathrooms": 2
    })
}

#[test]
fn health_check() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    let resp = get(&db, &svc, "/health");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["status"], "ok");
}

#[test]
fn sangotedo_properties_via_api() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    for p in [
        property("Property 1", "Sangotedo", 6.4698, 3.6285),
        property("Property 2", "Sangotedo, Ajah", 6.4720, 3.6301),
        property("Property 3", "sangotedo lagos", 6.4705, 3.6290),
    ] {
        let resp = post_json(&db, &svc, "/api/properties", &p);
        assert_eq!(resp.status(), 200);
    }

    let resp = get(&db, &svc, "/api/properties/search?location=sangotedo");
    assert_eq!(resp.status(), 200);

    let data = body_json(resp);
    assert_eq!(data["count"], 3);
    assert_eq!(data["properties"].as_array().unwrap().len(), 3);
    assert_eq!(data["bucket_info"]["bucket_key"], "6.470_3.630");
    assert_eq!(data["bucket_info"]["canonical_name"], "sangotedo");
}

#[test]
fn percent_encoded_query_is_decoded() {
    let db = init_test_db();
    let svc = GeoBucketService::default();
    post_json(&db, &svc, "/api/properties", &property("p", "Sangotedo, Ajah", 6.4698, 3.6285));

    for uri in [
        "/api/properties/search?location=Sangotedo%2C%20Ajah",
        "/api/properties/search?location=sangotedo+lagos",
        "/api/properties/search?location=SanGoTeDo",
    ] {
        let data = body_json(get(&db, &svc, uri));
        assert_eq!(data["count"], 1, "uri {uri}");
    }
}

#[test]
fn create_property_returns_bucket_id_and_raw_location() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    let resp = post_json(&db, &svc, "/api/properties", &property("New Property", "Test Location!", 6.5, 3.5));
    assert_eq!(resp.status(), 200);

    let data = body_json(resp);
    assert_eq!(data["title"], "New Property");
    assert_eq!(data["location_name"], "Test Location!");
    assert!(data["geo_bucket_id"].is_i64());
    assert!(data["created_at"].is_string());
}

#[test]
fn create_property_validation() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    // Missing required fields
    let resp = post_json(&db, &svc, "/api/properties", &json!({"title": "Test", "lat": 6.5, "lng": 3.5}));
    assert_eq!(resp.status(), 422);

    // Out of range latitude
    let resp = post_json(&db, &svc, "/api/properties", &property("Bad", "Ajah", 123.0, 3.5));
    assert_eq!(resp.status(), 422);

    // Nothing reached the store
    let stats = body_json(get(&db, &svc, "/api/geo-buckets/stats"));
    assert_eq!(stats["total_buckets"], 0);
}

#[test]
fn malformed_json_is_bad_request() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/properties")
        .body(Body::from("{not json".to_string()))
        .unwrap();
    let resp = handle(req, &db, &svc).unwrap();
    assert_eq!(resp.status(), 400);
    assert!(body_json(resp)["detail"].is_string());
}

#[test]
fn search_empty_result() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    let data = body_json(get(&db, &svc, "/api/properties/search?location=nonexistent"));
    assert_eq!(data["count"], 0);
    assert!(data["bucket_info"].is_null());
}

#[test]
fn search_requires_location() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    assert_eq!(get(&db, &svc, "/api/properties/search").status(), 422);
    assert_eq!(get(&db, &svc, "/api/properties/search?location=%20").status(), 422);
}

#[test]
fn bucket_stats() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    let empty = body_json(get(&db, &svc, "/api/geo-buckets/stats"));
    assert_eq!(empty["total_buckets"], 0);
    assert_eq!(empty["avg_properties_per_bucket"], 0.0);

    post_json(&db, &svc, "/api/properties", &property("a", "Test Location", 6.5, 3.5));
    post_json(&db, &svc, "/api/properties", &property("b", "Test, Lagos", 6.5001, 3.5001));
    post_json(&db, &svc, "/api/properties", &property("c", "Ikeja GRA", 6.5833, 3.35));

    let data = body_json(get(&db, &svc, "/api/geo-buckets/stats"));
    assert_eq!(data["total_buckets"], 2);
    assert_eq!(data["total_properties"], 3);
    assert_eq!(data["avg_properties_per_bucket"], 1.5);

    let first = &data["buckets"][0];
    assert_eq!(first["canonical_name"], "location test");
    assert_eq!(first["aliases"], json!(["location test", "test"]));
    assert_eq!(first["property_count"], 2);
}

#[test]
fn unknown_api_route_is_json_404() {
    let db = init_test_db();
    let svc = GeoBucketService::default();

    let resp = get(&db, &svc, "/api/nope");
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["detail"], "Not Found");
}
