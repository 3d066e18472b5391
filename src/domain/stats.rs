// src/domain/stats.rs

use serde::Serialize;

use crate::domain::Bucket;

/// Per-bucket line in the stats summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSummary {
    pub id: i64,
    pub bucket_key: String,
    pub canonical_name: String,
    pub aliases: Vec<String>,
    pub property_count: i64,
    pub centroid_lat: f64,
    pub centroid_lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStats {
    pub total_buckets: usize,
    pub total_properties: i64,
    pub avg_properties_per_bucket: f64,
    pub buckets: Vec<BucketSummary>,
}

impl BucketStats {
    pub fn from_buckets(buckets: &[Bucket]) -> Self {
        let total_buckets = buckets.len();
        let total_properties: i64 = buckets.iter().map(|b| b.property_count).sum();

        let avg = if total_buckets == 0 {
            0.0
        } else {
            round2(total_properties as f64 / total_buckets as f64)
        };

        BucketStats {
            total_buckets,
            total_properties,
            avg_properties_per_bucket: avg,
            buckets: buckets.iter().map(BucketSummary::from).collect(),
        }
    }
}

impl From<&Bucket> for BucketSummary {
    fn from(b: &Bucket) -> Self {
        BucketSummary {
            id: b.id,
            bucket_key: b.bucket_key.clone(),
            canonical_name: b.canonical_name.clone(),
            aliases: b.aliases.clone(),
            property_count: b.property_count,
            centroid_lat: b.centroid_lat,
            centroid_lng: b.centroid_lng,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
