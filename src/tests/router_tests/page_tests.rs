use crate::geo::GeoBucketService;
use crate::router::handle;
use crate::seed::seed_demo_data;
use crate::tests::utils::init_test_db;
use astra::Body;
use http::{Method, Request};
use std::io::Read;

fn get_html(uri: &str, seed: bool) -> (u16, String) {
    let db = init_test_db();
    let svc = GeoBucketService::default();
    if seed {
        seed_demo_data(&db, &svc).expect("Failed to seed");
    }

    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db, &svc).expect("Failed to handle request");
    let status = resp.status().as_u16();

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    (status, body)
}

#[test]
fn home_page_has_search_form() {
    let (status, body) = get_html("/", false);
    assert_eq!(status, 200);
    assert!(body.contains("<form"));
    assert!(body.contains("name=\"location\""));
}

#[test]
fn search_page_lists_matching_listings() {
    let (status, body) = get_html("/search?location=Sangotedo%2C+Lagos", true);
    assert_eq!(status, 200);
    assert!(body.contains("Modern 3 Bedroom Apartment in Sangotedo"));
    assert!(body.contains("Luxury 4 Bedroom Duplex"));
    assert!(body.contains("Cozy 2 Bedroom Flat"));
    assert!(body.contains("3 listing(s)"));
    assert!(!body.contains("Beach House in Lekki"));
}

#[test]
fn search_page_without_match() {
    let (status, body) = get_html("/search?location=Maitama", true);
    assert_eq!(status, 200);
    assert!(body.contains("No area matched"));
}

#[test]
fn buckets_page_shows_keys_and_aliases() {
    let (status, body) = get_html("/buckets", true);
    assert_eq!(status, 200);
    assert!(body.contains("6.470_3.630"));
    assert!(body.contains("sangotedo, ajah sangotedo"));
}

#[test]
fn unknown_page_is_not_found() {
    let db = init_test_db();
    let svc = GeoBucketService::default();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/nope")
        .body(Body::empty())
        .unwrap();

    let err = handle(req, &db, &svc).unwrap_err();
    assert_eq!(err.status(), 404);
}
