pub mod prelude;

pub mod business_types;
pub mod news_categories;
pub mod product_types;
pub mod project_types;
pub mod search_analytics;
pub mod wiki_topics;
