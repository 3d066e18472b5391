// src/seed.rs
use crate::db::Database;
use crate::db::listings::count_listings;
use crate::domain::NewListing;
use crate::errors::ServerError;
use crate::geo::GeoBucketService;

// (title, location_name, lat, lng, price, bedrooms, bathrooms)
const DEMO_LISTINGS: [(&str, &str, f64, f64, f64, i64, i64); 8] = [
    ("Modern 3 Bedroom Apartment in Sangotedo", "Sangotedo", 6.4698, 3.6285, 2_500_000.0, 3, 2),
    ("Luxury 4 Bedroom Duplex", "Sangotedo, Ajah", 6.4720, 3.6301, 4_500_000.0, 4, 3),
    ("Cozy 2 Bedroom Flat", "sangotedo lagos", 6.4705, 3.6290, 1_800_000.0, 2, 2),
    ("Spacious 5 Bedroom Mansion", "Lekki Phase 1", 6.4371, 3.4698, 15_000_000.0, 5, 5),
    ("Studio Apartment in Victoria Island", "Victoria Island, Lagos", 6.4281, 3.4219, 1_200_000.0, 1, 1),
    ("3 Bed Flat in Ikeja", "Ikeja GRA", 6.5833, 3.3500, 2_200_000.0, 3, 2),
    ("Executive 4 Bedroom in Ajah", "Ajah, Lagos", 6.4667, 3.5833, 3_500_000.0, 4, 3),
    ("Beach House in Lekki", "lekki", 6.4375, 3.4700, 8_000_000.0, 4, 4),
];

pub fn demo_listings() -> Vec<NewListing> {
    DEMO_LISTINGS
        .iter()
        .map(|&(title, location_name, lat, lng, price, bedrooms, bathrooms)| NewListing {
            title: title.to_string(),
            location_name: location_name.to_string(),
            lat,
            lng,
            price,
            bedrooms,
            bathrooms,
        })
        .collect()
}

/// Loads the demo listings when the store has no listings yet.
/// Returns how many were inserted.
pub fn seed_demo_data(db: &Database, svc: &GeoBucketService) -> Result<usize, ServerError> {
    let existing = db.with_conn(|conn| count_listings(conn))?;
    if existing > 0 {
        tracing::info!(existing, "store already has listings, skipping seed");
        return Ok(0);
    }

    let demo = demo_listings();
    for listing in &demo {
        svc.create_listing(db, listing)?;
    }

    let sangotedo = svc.search(db, "sangotedo")?.listings.len();
    tracing::info!(inserted = demo.len(), sangotedo, "seeded demo listings");
    Ok(demo.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::init_test_db;

    #[test]
    fn demo_listings_are_valid() {
        for l in demo_listings() {
            assert!(l.validate().is_ok(), "{} should validate", l.title);
        }
    }

    #[test]
    fn seeds_once() {
        let db = init_test_db();
        let svc = GeoBucketService::default();

        assert_eq!(seed_demo_data(&db, &svc).unwrap(), 8);
        assert_eq!(seed_demo_data(&db, &svc).unwrap(), 0);

        assert_eq!(svc.search(&db, "sangotedo").unwrap().listings.len(), 3);

        let stats = svc.stats(&db).unwrap();
        assert_eq!(stats.total_properties, 8);
        // 6.4375 sits exactly on a cell edge and rounds up, away from Lekki Phase 1.
        let lekki_keys: Vec<&str> = stats
            .buckets
            .iter()
            .filter(|b| b.canonical_name.contains("lekki"))
            .map(|b| b.bucket_key.as_str())
            .collect();
        assert_eq!(lekki_keys, vec!["6.435_3.470", "6.440_3.470"]);
        assert_eq!(svc.search(&db, "Lekki").unwrap().listings.len(), 2);
    }
}
