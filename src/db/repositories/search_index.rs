use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use serde::Serialize;

/// One ranked match from the denormalized search index. Rows are produced by
/// an external indexing process; this service only reads them.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct SearchHit {
    pub searchable_id: i64,
    pub searchable_type: String,
    pub listing_type: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<Vec<String>>,
    pub published_date: Option<DateTime<Utc>>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub price_unit: Option<String>,
    pub address_detail: Option<String>,
    pub sub_type_slug: Option<String>,
    pub score: f32,
}

const FULL_TEXT_SQL: &str = r"
SELECT
    searchable_id,
    searchable_type,
    listing_type,
    title,
    description,
    url,
    image_url,
    published_date,
    price_from::float8 AS price_from,
    price_to::float8 AS price_to,
    price_unit,
    address_detail,
    sub_type_slug,
    ts_rank(fts_document, websearch_to_tsquery($2::regconfig, $1)) AS score
FROM global_search_index
WHERE fts_document @@ websearch_to_tsquery($2::regconfig, $1)
ORDER BY score DESC
LIMIT 20
";

pub struct SearchIndexRepository {
    conn: DatabaseConnection,
}

impl SearchIndexRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Ranks index rows against a free-text term using the store's text
    /// search engine. `language` selects the text-search configuration
    /// (e.g. `vietnamese`) and is bound as a parameter like the term itself.
    pub async fn full_text_search(&self, term: &str, language: &str) -> Result<Vec<SearchHit>> {
        let hits = SearchHit::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            FULL_TEXT_SQL,
            [term.into(), language.into()],
        ))
        .all(&self.conn)
        .await?;

        Ok(hits)
    }
}
