// src/domain/bucket.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const UNKNOWN_CANONICAL_NAME: &str = "unknown";

/// A grid cell that has received at least one listing, plus every
/// normalized name variant seen for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub id: i64,
    pub bucket_key: String,
    /// Normalized form of the first location name this bucket saw.
    pub canonical_name: String,
    /// Distinct normalized names, in the order they were first seen.
    pub aliases: Vec<String>,
    /// Grid-cell center, not the mean of member coordinates.
    pub centroid_lat: f64,
    pub centroid_lng: f64,
    /// Number of listings referencing this bucket.
    pub property_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bucket {
    pub fn has_alias(&self, normalized: &str) -> bool {
        self.aliases.iter().any(|a| a == normalized)
    }

    /// Appends `normalized` if it is non-empty and unseen.
    /// Returns whether the alias list changed.
    pub fn push_alias(&mut self, normalized: &str) -> bool {
        if normalized.is_empty() || self.has_alias(normalized) {
            return false;
        }
        self.aliases.push(normalized.to_string());
        true
    }
}

/// Canonical name for a freshly created bucket.
pub fn canonical_name_for(normalized: &str) -> String {
    if normalized.is_empty() {
        UNKNOWN_CANONICAL_NAME.to_string()
    } else {
        normalized.to_string()
    }
}

/// Initial alias list for a freshly created bucket.
pub fn initial_aliases(normalized: &str) -> Vec<String> {
    if normalized.is_empty() {
        Vec::new()
    } else {
        vec![normalized.to_string()]
    }
}
