use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use serde::Serialize;

use super::taxonomy::MenuEntry;

/// The listing variant selected by the menu's `type` parameter. Each variant
/// owns its own pair of SQL templates (provinces, featured project).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Project,
    Sale,
    Rent,
}

impl ListingKind {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "project" => Some(Self::Project),
            "sale" => Some(Self::Sale),
            "rent" => Some(Self::Rent),
            _ => None,
        }
    }
}

/// The most recently published project surfaced next to a menu category.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct FeaturedProject {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub thumbnail_url: Option<String>,
    pub address_detail: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub price_unit: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

// Provinces are the parents of the districts listings point at; only rows of
// kind 'city' are surfaced.
const PROJECT_PROVINCES_SQL: &str = r"
SELECT DISTINCT province.name AS name, province.slug AS slug
FROM projects p
INNER JOIN project_types pt ON pt.id = p.project_type_id
INNER JOIN locations district ON district.id = p.location_id
INNER JOIN locations province ON province.id = district.parent_id
WHERE pt.slug = $1 AND province.kind = 'city'
ORDER BY name ASC
LIMIT 5
";

const SALE_PROVINCES_SQL: &str = r"
SELECT DISTINCT province.name AS name, province.slug AS slug
FROM product_sales l
INNER JOIN product_types t ON t.id = l.product_type_id
INNER JOIN locations district ON district.id = l.location_id
INNER JOIN locations province ON province.id = district.parent_id
WHERE t.slug = $1 AND province.kind = 'city'
ORDER BY name ASC
LIMIT 5
";

const RENT_PROVINCES_SQL: &str = r"
SELECT DISTINCT province.name AS name, province.slug AS slug
FROM product_rents l
INNER JOIN product_types t ON t.id = l.product_type_id
INNER JOIN locations district ON district.id = l.location_id
INNER JOIN locations province ON province.id = district.parent_id
WHERE t.slug = $1 AND province.kind = 'city'
ORDER BY name ASC
LIMIT 5
";

const PROJECT_FEATURED_SQL: &str = r"
SELECT p.id, p.name, p.slug, p.thumbnail_url, p.address_detail,
       p.price_from::float8 AS price_from, p.price_to::float8 AS price_to,
       p.price_unit, p.published_at
FROM projects p
INNER JOIN project_types pt ON pt.id = p.project_type_id
WHERE pt.slug = $1
ORDER BY p.published_at DESC NULLS LAST
LIMIT 1
";

// For sale/rent the featured row is still a project: the newest one holding
// at least one listing of the requested product type. EXISTS keeps the
// result deduplicated by project identity.
const SALE_FEATURED_SQL: &str = r"
SELECT p.id, p.name, p.slug, p.thumbnail_url, p.address_detail,
       p.price_from::float8 AS price_from, p.price_to::float8 AS price_to,
       p.price_unit, p.published_at
FROM projects p
WHERE EXISTS (
    SELECT 1
    FROM product_sales l
    INNER JOIN product_types t ON t.id = l.product_type_id
    WHERE l.project_id = p.id AND t.slug = $1
)
ORDER BY p.published_at DESC NULLS LAST
LIMIT 1
";

const RENT_FEATURED_SQL: &str = r"
SELECT p.id, p.name, p.slug, p.thumbnail_url, p.address_detail,
       p.price_from::float8 AS price_from, p.price_to::float8 AS price_to,
       p.price_unit, p.published_at
FROM projects p
WHERE EXISTS (
    SELECT 1
    FROM product_rents l
    INNER JOIN product_types t ON t.id = l.product_type_id
    WHERE l.project_id = p.id AND t.slug = $1
)
ORDER BY p.published_at DESC NULLS LAST
LIMIT 1
";

pub struct ListingsRepository {
    conn: DatabaseConnection,
}

impl ListingsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Provinces that have at least one listing of the given kind whose
    /// taxonomy slug matches. Alphabetical, at most five.
    pub async fn provinces_for_slug(
        &self,
        kind: ListingKind,
        slug: &str,
    ) -> Result<Vec<MenuEntry>> {
        let sql = match kind {
            ListingKind::Project => PROJECT_PROVINCES_SQL,
            ListingKind::Sale => SALE_PROVINCES_SQL,
            ListingKind::Rent => RENT_PROVINCES_SQL,
        };

        let rows = MenuEntry::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [slug.into()],
        ))
        .all(&self.conn)
        .await?;

        Ok(rows)
    }

    /// Most recently published matching project, or `None` when the slug has
    /// no listings yet.
    pub async fn featured_project(
        &self,
        kind: ListingKind,
        slug: &str,
    ) -> Result<Option<FeaturedProject>> {
        let sql = match kind {
            ListingKind::Project => PROJECT_FEATURED_SQL,
            ListingKind::Sale => SALE_FEATURED_SQL,
            ListingKind::Rent => RENT_FEATURED_SQL,
        };

        let row = FeaturedProject::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [slug.into()],
        ))
        .one(&self.conn)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_kind() {
        assert_eq!(ListingKind::parse("project"), Some(ListingKind::Project));
        assert_eq!(ListingKind::parse("sale"), Some(ListingKind::Sale));
        assert_eq!(ListingKind::parse("rent"), Some(ListingKind::Rent));
        assert_eq!(ListingKind::parse("Project"), None);
        assert_eq!(ListingKind::parse("bogus"), None);
        assert_eq!(ListingKind::parse(""), None);
    }
}
