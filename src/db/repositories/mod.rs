pub mod analytics;
pub mod listings;
pub mod search_index;
pub mod taxonomy;
