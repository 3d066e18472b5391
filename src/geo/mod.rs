pub mod grid;
pub mod matcher;
pub mod normalize;
pub mod service;

pub use grid::{GridCell, GridKeyer};
pub use matcher::match_buckets;
pub use normalize::Normalizer;
pub use service::{GeoBucketService, SearchOutcome};
