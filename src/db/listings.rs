// src/db/listings.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::domain::{Listing, NewListing};
use crate::errors::ServerError;

const LISTING_COLUMNS: &str =
    "id, title, location_name, lat, lng, price, bedrooms, bathrooms, geo_bucket_id, created_at";

fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        location_name: row.get(2)?,
        lat: row.get(3)?,
        lng: row.get(4)?,
        price: row.get(5)?,
        bedrooms: row.get(6)?,
        bathrooms: row.get(7)?,
        geo_bucket_id: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Inserts a listing owned by `bucket_id`. The raw location name is stored verbatim.
pub fn insert_listing(
    conn: &Connection,
    bucket_id: i64,
    new: &NewListing,
    now: DateTime<Utc>,
) -> Result<Listing, ServerError> {
    conn.execute(
        r#"
        INSERT INTO listings
            (geo_bucket_id, title, location_name, lat, lng, price, bedrooms, bathrooms, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            bucket_id,
            &new.title,
            &new.location_name,
            new.lat,
            new.lng,
            new.price,
            new.bedrooms,
            new.bathrooms,
            now
        ],
    )?;

    Ok(Listing {
        id: conn.last_insert_rowid(),
        title: new.title.clone(),
        location_name: new.location_name.clone(),
        lat: new.lat,
        lng: new.lng,
        price: new.price,
        bedrooms: new.bedrooms,
        bathrooms: new.bathrooms,
        geo_bucket_id: bucket_id,
        created_at: now,
    })
}

/// Listings owned by any of `bucket_ids`, newest first.
pub fn listings_in_buckets(
    conn: &Connection,
    bucket_ids: &[i64],
) -> Result<Vec<Listing>, ServerError> {
    if bucket_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; bucket_ids.len()].join(", ");
    let sql = format!(
        "SELECT {LISTING_COLUMNS} FROM listings WHERE geo_bucket_id IN ({placeholders}) \
         ORDER BY created_at DESC, id DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(bucket_ids.iter()), listing_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_listings(conn: &Connection) -> Result<i64, ServerError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM listings", [], |r| r.get(0))?)
}

#[cfg(test)]
pub fn count_for_bucket(conn: &Connection, bucket_id: i64) -> Result<i64, ServerError> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM listings WHERE geo_bucket_id = ?1",
        params![bucket_id],
        |r| r.get(0),
    )?)
}
