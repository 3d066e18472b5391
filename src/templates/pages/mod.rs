pub mod buckets;
pub mod home;
pub mod search;

pub use buckets::buckets_page;
pub use home::home_page;
pub use search::search_page;
