pub mod bucket;
pub mod listing;
pub mod stats;

pub use bucket::Bucket;
pub use listing::{Listing, NewListing};
pub use stats::BucketStats;
