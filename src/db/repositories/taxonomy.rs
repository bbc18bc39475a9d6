use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::constants::menu;
use crate::entities::prelude::{
    BusinessTypes, NewsCategories, ProductTypes, ProjectTypes, WikiTopics,
};
use crate::entities::{business_types, news_categories, product_types, project_types, wiki_topics};

/// A `(name, slug)` pair as rendered in the navigation menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct MenuEntry {
    pub name: String,
    pub slug: String,
}

pub struct TaxonomyRepository {
    conn: DatabaseConnection,
}

impl TaxonomyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn project_types(&self) -> Result<Vec<MenuEntry>> {
        let rows = ProjectTypes::find()
            .select_only()
            .column(project_types::Column::Name)
            .column(project_types::Column::Slug)
            .order_by_asc(project_types::Column::Name)
            .into_model::<MenuEntry>()
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn product_types(&self) -> Result<Vec<MenuEntry>> {
        let rows = ProductTypes::find()
            .select_only()
            .column(product_types::Column::Name)
            .column(product_types::Column::Slug)
            .order_by_asc(product_types::Column::Name)
            .into_model::<MenuEntry>()
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    /// Wiki topic slugs are path-prefixed so the menu can link straight to
    /// the wiki section.
    pub async fn wiki_topics(&self) -> Result<Vec<MenuEntry>> {
        let rows = WikiTopics::find()
            .select_only()
            .column(wiki_topics::Column::Name)
            .column(wiki_topics::Column::Slug)
            .order_by_asc(wiki_topics::Column::Name)
            .into_model::<MenuEntry>()
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|mut entry| {
                entry.slug = format!("{}{}", menu::WIKI_SLUG_PREFIX, entry.slug);
                entry
            })
            .collect())
    }

    pub async fn news_categories(&self) -> Result<Vec<MenuEntry>> {
        let rows = NewsCategories::find()
            .select_only()
            .column(news_categories::Column::Name)
            .column(news_categories::Column::Slug)
            .order_by_asc(news_categories::Column::Name)
            .into_model::<MenuEntry>()
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|mut entry| {
                entry.slug = format!("{}{}", menu::NEWS_SLUG_PREFIX, entry.slug);
                entry
            })
            .collect())
    }

    pub async fn business_types(&self) -> Result<Vec<MenuEntry>> {
        let rows = BusinessTypes::find()
            .select_only()
            .column(business_types::Column::Name)
            .column(business_types::Column::Slug)
            .order_by_asc(business_types::Column::Name)
            .into_model::<MenuEntry>()
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
