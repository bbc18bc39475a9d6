use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::listings::{FeaturedProject, ListingKind};
pub use repositories::search_index::SearchHit;
pub use repositories::taxonomy::MenuEntry;

/// Thin facade over the connection pool. Everything except the analytics
/// counter is read-only; freshness of the search index and taxonomy tables is
/// somebody else's job.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        // Only covers search_analytics; the rest of the schema is owned by
        // the indexing pipeline.
        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Wraps an already-built connection. Used by tests.
    #[must_use]
    pub const fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one_raw(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn search_index_repo(&self) -> repositories::search_index::SearchIndexRepository {
        repositories::search_index::SearchIndexRepository::new(self.conn.clone())
    }

    fn analytics_repo(&self) -> repositories::analytics::AnalyticsRepository {
        repositories::analytics::AnalyticsRepository::new(self.conn.clone())
    }

    fn taxonomy_repo(&self) -> repositories::taxonomy::TaxonomyRepository {
        repositories::taxonomy::TaxonomyRepository::new(self.conn.clone())
    }

    fn listings_repo(&self) -> repositories::listings::ListingsRepository {
        repositories::listings::ListingsRepository::new(self.conn.clone())
    }

    pub async fn search_listings(&self, term: &str, language: &str) -> Result<Vec<SearchHit>> {
        self.search_index_repo().full_text_search(term, language).await
    }

    pub async fn record_search_term(&self, term: &str) -> Result<()> {
        self.analytics_repo().record_term(term).await
    }

    pub async fn top_search_terms(&self, limit: u64) -> Result<Vec<String>> {
        self.analytics_repo().top_terms(limit).await
    }

    pub async fn project_types(&self) -> Result<Vec<MenuEntry>> {
        self.taxonomy_repo().project_types().await
    }

    pub async fn product_types(&self) -> Result<Vec<MenuEntry>> {
        self.taxonomy_repo().product_types().await
    }

    pub async fn wiki_topics(&self) -> Result<Vec<MenuEntry>> {
        self.taxonomy_repo().wiki_topics().await
    }

    pub async fn news_categories(&self) -> Result<Vec<MenuEntry>> {
        self.taxonomy_repo().news_categories().await
    }

    pub async fn business_types(&self) -> Result<Vec<MenuEntry>> {
        self.taxonomy_repo().business_types().await
    }

    pub async fn listing_provinces(&self, kind: ListingKind, slug: &str) -> Result<Vec<MenuEntry>> {
        self.listings_repo().provinces_for_slug(kind, slug).await
    }

    pub async fn featured_project(
        &self,
        kind: ListingKind,
        slug: &str,
    ) -> Result<Option<FeaturedProject>> {
        self.listings_repo().featured_project(kind, slug).await
    }
}
