// src/db/buckets.rs
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::bucket::{canonical_name_for, initial_aliases, Bucket};
use crate::errors::ServerError;
use crate::geo::GridCell;

/// How many times a bucket insert that lost a unique-key race is retried as a lookup.
const MAX_CREATE_ATTEMPTS: usize = 3;

const BUCKET_COLUMNS: &str = "id, bucket_key, canonical_name, aliases, centroid_lat, centroid_lng, \
     property_count, created_at, updated_at";

fn bucket_from_row(row: &Row<'_>) -> rusqlite::Result<Bucket> {
    let aliases_json: String = row.get(3)?;
    let aliases: Vec<String> = serde_json::from_str(&aliases_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Bucket {
        id: row.get(0)?,
        bucket_key: row.get(1)?,
        canonical_name: row.get(2)?,
        aliases,
        centroid_lat: row.get(4)?,
        centroid_lng: row.get(5)?,
        property_count: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn aliases_to_json(aliases: &[String]) -> Result<String, ServerError> {
    serde_json::to_string(aliases)
        .map_err(|e| ServerError::DbError(format!("encode aliases failed: {e}")))
}

pub fn find_by_key(conn: &Connection, key: &str) -> Result<Option<Bucket>, ServerError> {
    conn.query_row(
        &format!("SELECT {BUCKET_COLUMNS} FROM geo_buckets WHERE bucket_key = ?1"),
        params![key],
        bucket_from_row,
    )
    .optional()
    .map_err(ServerError::from)
}

#[cfg(test)]
pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Bucket>, ServerError> {
    conn.query_row(
        &format!("SELECT {BUCKET_COLUMNS} FROM geo_buckets WHERE id = ?1"),
        params![id],
        bucket_from_row,
    )
    .optional()
    .map_err(ServerError::from)
}

/// Every bucket, in insertion (id) order.
pub fn all_buckets(conn: &Connection) -> Result<Vec<Bucket>, ServerError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BUCKET_COLUMNS} FROM geo_buckets ORDER BY id"
    ))?;

    let rows = stmt.query_map([], bucket_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Inserts a new bucket. A duplicate key surfaces as `ServerError::Conflict`.
pub fn insert_bucket(
    conn: &Connection,
    cell: &GridCell,
    normalized_name: &str,
    now: DateTime<Utc>,
) -> Result<Bucket, ServerError> {
    let canonical_name = canonical_name_for(normalized_name);
    let aliases = initial_aliases(normalized_name);

    conn.execute(
        r#"
        INSERT INTO geo_buckets
            (bucket_key, canonical_name, centroid_lat, centroid_lng, aliases, property_count, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)
        "#,
        params![
            &cell.key,
            &canonical_name,
            cell.lat,
            cell.lng,
            aliases_to_json(&aliases)?,
            now
        ],
    )?;

    Ok(Bucket {
        id: conn.last_insert_rowid(),
        bucket_key: cell.key.clone(),
        canonical_name,
        aliases,
        centroid_lat: cell.lat,
        centroid_lng: cell.lng,
        property_count: 0,
        created_at: now,
        updated_at: now,
    })
}

fn save_aliases(conn: &Connection, bucket: &Bucket) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE geo_buckets SET aliases = ?1, updated_at = ?2 WHERE id = ?3",
        params![aliases_to_json(&bucket.aliases)?, bucket.updated_at, bucket.id],
    )?;
    Ok(())
}

/// Looks up the bucket for `cell`, recording `normalized_name` as an alias,
/// or creates it when the cell has never been seen.
///
/// Losing a unique-key race against a concurrent creator is retried as a lookup.
pub fn get_or_create(
    conn: &Connection,
    cell: &GridCell,
    normalized_name: &str,
    now: DateTime<Utc>,
) -> Result<Bucket, ServerError> {
    for attempt in 1..=MAX_CREATE_ATTEMPTS {
        if let Some(mut bucket) = find_by_key(conn, &cell.key)? {
            if bucket.push_alias(normalized_name) {
                bucket.updated_at = now;
                save_aliases(conn, &bucket)?;
                tracing::debug!(bucket_key = %bucket.bucket_key, alias = normalized_name, "recorded new alias");
            }
            return Ok(bucket);
        }

        match insert_bucket(conn, cell, normalized_name, now) {
            Ok(bucket) => {
                tracing::info!(
                    bucket_key = %bucket.bucket_key,
                    canonical_name = %bucket.canonical_name,
                    "created geo bucket"
                );
                return Ok(bucket);
            }
            Err(ServerError::Conflict(msg)) => {
                tracing::debug!(bucket_key = %cell.key, attempt, %msg, "bucket insert conflicted, retrying lookup");
            }
            Err(e) => return Err(e),
        }
    }

    Err(ServerError::DbError(format!(
        "bucket {} could not be created or found after {MAX_CREATE_ATTEMPTS} attempts",
        cell.key
    )))
}

/// Bumps `property_count` by one. Callers run this in the same transaction
/// as the listing insert.
pub fn increment_count(conn: &Connection, bucket_id: i64, now: DateTime<Utc>) -> Result<(), ServerError> {
    let changed = conn.execute(
        "UPDATE geo_buckets SET property_count = property_count + 1, updated_at = ?1 WHERE id = ?2",
        params![now, bucket_id],
    )?;
    if changed != 1 {
        return Err(ServerError::DbError(format!("bucket {bucket_id} not found")));
    }
    Ok(())
}

#[cfg(test)]
pub fn count_buckets(conn: &Connection) -> Result<i64, ServerError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM geo_buckets", [], |r| r.get(0))?)
}
