// src/domain/listing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

const MAX_TEXT_LEN: usize = 255;

/// A stored listing. `location_name` is the verbatim user input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub location_name: String,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub geo_bucket_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Create-listing payload as it arrives over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub location_name: String,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
}

impl NewListing {
    /// Field presence and range checks. Runs before the bucket core sees
    /// the listing.
    pub fn validate(&self) -> Result<(), ServerError> {
        check_text("title", &self.title)?;
        check_text("location_name", &self.location_name)?;

        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ServerError::Validation(format!(
                "lat must be between -90 and 90, got {}",
                self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(ServerError::Validation(format!(
                "lng must be between -180 and 180, got {}",
                self.lng
            )));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ServerError::Validation("price must be greater than 0".into()));
        }
        if self.bedrooms < 0 {
            return Err(ServerError::Validation("bedrooms must be >= 0".into()));
        }
        if self.bathrooms < 0 {
            return Err(ServerError::Validation("bathrooms must be >= 0".into()));
        }
        Ok(())
    }
}

fn check_text(field: &str, value: &str) -> Result<(), ServerError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(ServerError::Validation(format!("{field} is required")));
    }
    if len > MAX_TEXT_LEN {
        return Err(ServerError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}
