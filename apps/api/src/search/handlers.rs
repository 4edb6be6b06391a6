//! Axum route handlers for the job search API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::{SearchQuery, SearchResult};
use crate::state::AppState;

const MAX_QUERY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct JobsParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notify: bool,
}

/// GET /api/v1/jobs?query=&location=&notify=
///
/// Always 200 for a valid query: when live boards fail, the body carries
/// sample listings with `succeeded: false` and an `errorMessage`.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsParams>,
) -> Result<Json<SearchResult>, AppError> {
    if params.query.chars().count() > MAX_QUERY_CHARS
        || params.location.chars().count() > MAX_QUERY_CHARS
    {
        return Err(AppError::Validation(format!(
            "query and location must be at most {MAX_QUERY_CHARS} characters"
        )));
    }

    let query = SearchQuery::new(params.query, params.location);
    let result = state.search.search(query, params.notify).await;
    Ok(Json(result))
}
