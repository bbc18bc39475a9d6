use anyhow::Result;
use sea_orm::sea_query::{Expr, ExprTrait, OnConflict};
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, QuerySelect, Set,
};

use crate::entities::{prelude::SearchAnalytics, search_analytics};

#[derive(Debug, FromQueryResult)]
struct TermRow {
    term: String,
}

pub struct AnalyticsRepository {
    conn: DatabaseConnection,
}

impl AnalyticsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Increment-or-insert for a normalized search term. A single upsert
    /// statement, so concurrent increments of the same term stay race-safe
    /// without explicit locking.
    pub async fn record_term(&self, term: &str) -> Result<()> {
        let row = search_analytics::ActiveModel {
            term: Set(term.to_string()),
            search_count: Set(1),
            last_searched_at: Set(chrono::Utc::now()),
        };

        SearchAnalytics::insert(row)
            .on_conflict(
                OnConflict::column(search_analytics::Column::Term)
                    .value(
                        search_analytics::Column::SearchCount,
                        Expr::col((
                            search_analytics::Entity,
                            search_analytics::Column::SearchCount,
                        ))
                        .add(1),
                    )
                    .value(
                        search_analytics::Column::LastSearchedAt,
                        Expr::current_timestamp(),
                    )
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    /// Most searched terms, most recent first on ties.
    pub async fn top_terms(&self, limit: u64) -> Result<Vec<String>> {
        let rows = SearchAnalytics::find()
            .select_only()
            .column(search_analytics::Column::Term)
            .order_by_desc(search_analytics::Column::SearchCount)
            .order_by_desc(search_analytics::Column::LastSearchedAt)
            .limit(limit)
            .into_model::<TermRow>()
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|r| r.term).collect())
    }
}
