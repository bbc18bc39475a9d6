use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::db::SearchHit;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Free-text search over the listing index. An empty or whitespace-only term
/// short-circuits to an empty list without touching the store.
pub async fn search_listings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let Some(term) = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
    else {
        return Ok(Json(Vec::new()));
    };

    // Detached counter update. Must never delay or fail the response.
    let counted = normalize_term(&term);
    let store = state.store.clone();
    tokio::spawn(async move {
        if let Err(e) = store.record_search_term(&counted).await {
            warn!("Failed to record search term: {}", e);
        }
    });

    let hits = state
        .store
        .search_listings(&term, &state.config.search.language)
        .await?;

    Ok(Json(hits))
}

/// Key used for the analytics counter: lowercased and trimmed, so repeated
/// searches for the same term land on one row.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Vinhomes  "), "vinhomes");
        assert_eq!(normalize_term("CĂN HỘ"), "căn hộ");
        assert_eq!(normalize_term(""), "");
    }
}
