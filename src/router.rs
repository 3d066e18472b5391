use crate::db::Database;
use crate::domain::{Bucket, Listing, NewListing};
use crate::errors::ServerError;
use crate::geo::GeoBucketService;
use crate::responses::{html_response, json_error_response, json_response, ResultResp};
use crate::templates;
use astra::Request;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

const MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Debug, Serialize)]
struct BucketInfo<'a> {
    id: i64,
    bucket_key: &'a str,
    canonical_name: &'a str,
}

impl<'a> From<&'a Bucket> for BucketInfo<'a> {
    fn from(b: &'a Bucket) -> Self {
        Self {
            id: b.id,
            bucket_key: &b.bucket_key,
            canonical_name: &b.canonical_name,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchResponse<'a> {
    properties: &'a [Listing],
    count: usize,
    bucket_info: Option<BucketInfo<'a>>,
}

/// Dispatch a request. Errors on `/api/` routes are rendered as JSON here;
/// everything else is returned for the caller to render as HTML.
pub fn handle(req: Request, db: &Database, svc: &GeoBucketService) -> ResultResp {
    let is_api = req.uri().path().starts_with("/api/");

    match route(req, db, svc) {
        Err(err) if is_api => {
            tracing::warn!(error = %err, "api request failed");
            Ok(json_error_response(&err))
        }
        other => other,
    }
}

fn route(req: Request, db: &Database, svc: &GeoBucketService) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => json_response(
            200,
            &json!({ "status": "ok", "message": "Geo-Bucket Property Search API" }),
        ),
        ("GET", "/") => html_response(templates::pages::home_page()),
        ("GET", "/search") => {
            let query = parse_query(&req);
            let location = query.get("location").map(String::as_str).unwrap_or("");
            let outcome = svc.search(db, location)?;
            html_response(templates::pages::search_page(location, &outcome))
        }
        ("GET", "/buckets") => {
            let stats = svc.stats(db)?;
            html_response(templates::pages::buckets_page(&stats))
        }

        ("POST", "/api/properties") => {
            let new: NewListing = read_json(req)?;
            new.validate()?;
            let listing = svc.create_listing(db, &new)?;
            json_response(200, &listing)
        }
        ("GET", "/api/properties/search") => {
            let query = parse_query(&req);
            let location = query
                .get("location")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ServerError::Validation("location is required".into()))?;

            let outcome = svc.search(db, location)?;
            json_response(
                200,
                &SearchResponse {
                    properties: &outcome.listings,
                    count: outcome.listings.len(),
                    bucket_info: outcome.primary_bucket.as_ref().map(BucketInfo::from),
                },
            )
        }
        ("GET", "/api/geo-buckets/stats") => json_response(200, &svc.stats(db)?),

        _ => Err(ServerError::NotFound),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_json<T: serde::de::DeserializeOwned>(req: Request) -> Result<T, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    serde_json::from_slice(&buf).map_err(|e| {
        if e.is_data() {
            // Well-formed JSON with missing or mistyped fields.
            ServerError::Validation(e.to_string())
        } else {
            ServerError::BadRequest(format!("invalid JSON: {e}"))
        }
    })
}
