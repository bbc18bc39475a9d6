use axum::{Json, extract::State};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use crate::constants::limits;

use super::AppState;

/// Curated terms first, then the top organic terms from the analytics
/// counter. This endpoint never fails: if the counter query errors, the
/// curated list alone is returned.
pub async fn popular_searches(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let manual = state.config.search.popular_terms.clone();

    let organic = match state
        .store
        .top_search_terms(limits::TOP_ORGANIC_TERMS)
        .await
    {
        Ok(terms) => terms,
        Err(e) => {
            warn!("Popular searches degraded to curated list: {}", e);
            Vec::new()
        }
    };

    Json(merge_popular_terms(manual, organic))
}

/// De-duplicates case-insensitively while preserving first-occurrence order,
/// capped at [`limits::MAX_POPULAR_TERMS`].
fn merge_popular_terms(manual: Vec<String>, organic: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for term in manual.into_iter().chain(organic) {
        let key = term.trim().to_lowercase();
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        merged.push(term);
        if merged.len() == limits::MAX_POPULAR_TERMS {
            break;
        }
    }

    merged
}
