use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::ListingKind;

use super::types::{
    CategorySection, DynamicMenuData, FeaturedSection, InitialMenuData, TopicSection, TypeSection,
};
use super::{ApiError, AppState};

/// All five taxonomy reads are independent, so they are fanned out together
/// and joined before the payload is assembled. One failure fails the request.
pub async fn initial_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InitialMenuData>, ApiError> {
    let store = &state.store;

    let (project_types, product_types, wiki_topics, news_categories, business_types) = tokio::try_join!(
        store.project_types(),
        store.product_types(),
        store.wiki_topics(),
        store.news_categories(),
        store.business_types(),
    )?;

    Ok(Json(InitialMenuData {
        du_an: TypeSection {
            types: project_types,
        },
        mua_ban: TypeSection {
            types: product_types.clone(),
        },
        cho_thue: TypeSection {
            types: product_types,
        },
        wiki: TopicSection {
            topics: wiki_topics,
        },
        tin_tuc: CategorySection {
            categories: news_categories,
        },
        doanh_nghiep: TypeSection {
            types: business_types,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct DynamicDataParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub slug: Option<String>,
}

pub async fn dynamic_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DynamicDataParams>,
) -> Result<Json<DynamicMenuData>, ApiError> {
    let kind = params
        .kind
        .as_deref()
        .ok_or_else(|| ApiError::missing_param("type"))?;
    let slug = params
        .slug
        .as_deref()
        .ok_or_else(|| ApiError::missing_param("slug"))?;

    let kind = ListingKind::parse(kind)
        .ok_or_else(|| ApiError::bad_request("type must be one of: project, sale, rent"))?;

    let (locations, featured) = tokio::try_join!(
        state.store.listing_provinces(kind, slug),
        state.store.featured_project(kind, slug),
    )?;

    Ok(Json(DynamicMenuData {
        locations,
        featured: FeaturedSection { project: featured },
    }))
}
