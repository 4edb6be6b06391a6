//! Axum route handlers for the ATS API.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::ats::keywords::ATS_KEYWORDS;
use crate::ats::scorer::{score_resume, ScoreResult};
use crate::models::resume::Resume;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<&'static str>,
}

/// POST /api/v1/ats/score
///
/// Scores a structured resume. Never fails on content: missing sections score 0.
pub async fn handle_score(Json(resume): Json<Resume>) -> Json<ScoreResponse> {
    let result = score_resume(&resume);
    debug!(
        "ATS score {} ({} strengths, {} improvements, {} keywords)",
        result.score,
        result.strengths.len(),
        result.improvements.len(),
        result.keywords.len()
    );
    Json(ScoreResponse {
        result,
        scored_at: Utc::now(),
    })
}

/// GET /api/v1/ats/keywords
pub async fn handle_keywords() -> Json<KeywordsResponse> {
    Json(KeywordsResponse {
        keywords: ATS_KEYWORDS.to_vec(),
    })
}
