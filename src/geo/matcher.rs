// src/geo/matcher.rs

use crate::domain::Bucket;

/// Which rule admitted a bucket. Variants are listed in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    /// Canonical name equals the query.
    Exact,
    /// Query is one of the recorded aliases.
    Alias,
    /// Query occurs inside the canonical name or inside any alias.
    Substring,
}

#[derive(Debug, Clone, Copy)]
pub struct BucketMatch<'a> {
    pub bucket: &'a Bucket,
    pub step: MatchStep,
}

/// First rule that admits `bucket` for an already-normalized, non-empty query.
pub fn match_step(bucket: &Bucket, query: &str) -> Option<MatchStep> {
    let canonical = bucket.canonical_name.to_lowercase();

    if canonical == query {
        return Some(MatchStep::Exact);
    }
    if bucket.has_alias(query) {
        return Some(MatchStep::Alias);
    }
    // Unbounded: a one-letter query hits nearly every bucket.
    if canonical.contains(query) || bucket.aliases.iter().any(|a| a.contains(query)) {
        return Some(MatchStep::Substring);
    }
    None
}

/// Scans `buckets` in order and keeps every bucket some rule admits.
/// Each bucket appears at most once and the input order is preserved.
/// An empty query matches nothing.
pub fn match_buckets<'a>(buckets: &'a [Bucket], normalized_query: &str) -> Vec<BucketMatch<'a>> {
    if normalized_query.is_empty() {
        return Vec::new();
    }

    buckets
        .iter()
        .filter_map(|bucket| {
            match_step(bucket, normalized_query).map(|step| BucketMatch { bucket, step })
        })
        .collect()
}
