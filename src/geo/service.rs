// src/geo/service.rs
use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior};

use crate::config::LocationConfig;
use crate::db::{buckets, listings, Database};
use crate::domain::{Bucket, BucketStats, Listing, NewListing};
use crate::errors::ServerError;
use crate::geo::{match_buckets, GridKeyer, Normalizer};

/// Result of a location search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Listings from every matched bucket, newest first.
    pub listings: Vec<Listing>,
    /// First matched bucket in store order. Informational only.
    pub primary_bucket: Option<Bucket>,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            listings: Vec::new(),
            primary_bucket: None,
        }
    }
}

/// Glues the normalizer and grid keyer to the bucket and listing tables.
#[derive(Debug, Clone)]
pub struct GeoBucketService {
    normalizer: Normalizer,
    keyer: GridKeyer,
}

impl GeoBucketService {
    pub fn new(cfg: &LocationConfig) -> Self {
        Self {
            normalizer: Normalizer::new(cfg),
            keyer: GridKeyer::new(cfg),
        }
    }

    /// Get-or-create the bucket for a coordinate pair, recording the
    /// normalized location name as an alias.
    pub fn get_or_create_bucket(
        &self,
        conn: &Connection,
        lat: f64,
        lng: f64,
        raw_location_name: &str,
    ) -> Result<Bucket, ServerError> {
        let cell = self.keyer.cell(lat, lng);
        let normalized = self.normalizer.normalize(raw_location_name);
        buckets::get_or_create(conn, &cell, &normalized, Utc::now())
    }

    /// Assigns the listing to its bucket and stores it.
    ///
    /// Bucket get-or-create, alias accrual, listing insert and the count bump
    /// share one IMMEDIATE transaction; any failure rolls all of them back.
    pub fn create_listing(&self, db: &Database, new: &NewListing) -> Result<Listing, ServerError> {
        db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let bucket = self.get_or_create_bucket(&tx, new.lat, new.lng, &new.location_name)?;
            let now = Utc::now();
            // Only bucket inserts may conflict; anything else here is a store failure.
            let listing =
                listings::insert_listing(&tx, bucket.id, new, now).map_err(ServerError::into_store_failure)?;
            buckets::increment_count(&tx, bucket.id, now)?;

            tx.commit()?;

            tracing::info!(
                listing_id = listing.id,
                bucket_key = %bucket.bucket_key,
                "created listing"
            );
            Ok(listing)
        })
    }

    /// Buckets related to `query`, in store order.
    pub fn find_buckets(&self, db: &Database, query: &str) -> Result<Vec<Bucket>, ServerError> {
        let normalized = self.normalizer.normalize(query);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let all = db.with_conn(|conn| buckets::all_buckets(conn))?;
        let matches = match_buckets(&all, &normalized);

        for m in &matches {
            tracing::debug!(bucket_key = %m.bucket.bucket_key, step = ?m.step, query = %normalized, "bucket matched");
        }

        Ok(matches.into_iter().map(|m| m.bucket.clone()).collect())
    }

    /// Listings from every bucket the query matches, newest first.
    pub fn search(&self, db: &Database, query: &str) -> Result<SearchOutcome, ServerError> {
        let matched = self.find_buckets(db, query)?;
        if matched.is_empty() {
            tracing::debug!(query, "no bucket matched");
            return Ok(SearchOutcome::empty());
        }

        let ids: Vec<i64> = matched.iter().map(|b| b.id).collect();
        let found = db.with_conn(|conn| listings::listings_in_buckets(conn, &ids))?;

        Ok(SearchOutcome {
            listings: found,
            primary_bucket: matched.into_iter().next(),
        })
    }

    pub fn stats(&self, db: &Database) -> Result<BucketStats, ServerError> {
        let all = db.with_conn(|conn| buckets::all_buckets(conn))?;
        Ok(BucketStats::from_buckets(&all))
    }
}

impl Default for GeoBucketService {
    fn default() -> Self {
        Self::new(&LocationConfig::default())
    }
}
