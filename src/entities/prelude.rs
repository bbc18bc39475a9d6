pub use super::business_types::Entity as BusinessTypes;
pub use super::news_categories::Entity as NewsCategories;
pub use super::product_types::Entity as ProductTypes;
pub use super::project_types::Entity as ProjectTypes;
pub use super::search_analytics::Entity as SearchAnalytics;
pub use super::wiki_topics::Entity as WikiTopics;
