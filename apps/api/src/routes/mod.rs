pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::errors::AppError;
use crate::notify::handlers as notify;
use crate::search::handlers as search;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // ATS scoring
        .route("/api/v1/ats/score", post(ats::handle_score))
        .route("/api/v1/ats/keywords", get(ats::handle_keywords))
        // Job search
        .route("/api/v1/jobs", get(search::handle_search_jobs))
        // Email relay
        .route("/api/v1/email", post(notify::handle_send_email))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::mail_client::MailClient;
    use crate::models::job::{JobListing, SearchQuery};
    use crate::search::fallback::CannedJobs;
    use crate::search::source::{NoopNotifier, RemoteJobSource, SourceError};
    use crate::search::SearchClient;

    struct DownSource;

    #[async_trait]
    impl RemoteJobSource for DownSource {
        async fn fetch(&self, _query: &SearchQuery) -> Result<Vec<JobListing>, SourceError> {
            Err(SourceError::NoListings { boards: 2 })
        }
    }

    fn app() -> Router {
        let state = AppState {
            search: SearchClient::new(
                Arc::new(DownSource),
                Arc::new(CannedJobs::default()),
                Arc::new(NoopNotifier),
            ),
            mail: MailClient::new(
                "http://127.0.0.1:9/v3/smtp/email".to_string(),
                None,
                "no-reply@jobportal.in".to_string(),
                "Job Portal".to_string(),
            )
            .unwrap(),
        };
        build_router(state)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mail_configured"], false);
    }

    #[tokio::test]
    async fn test_score_empty_resume() {
        let (status, body) = send(post_json("/api/v1/ats/score", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 0);
        assert_eq!(body["strengths"], json!([]));
        assert!(body["scoredAt"].is_string());
    }

    #[tokio::test]
    async fn test_score_partial_resume() {
        let resume = json!({
            "personalInfo": { "name": "Asha Rao", "email": "asha@example.com" },
            "skills": ["Rust", "SQL", "Docker", "Kubernetes", "Team leadership"]
        });
        let (status, body) = send(post_json("/api/v1/ats/score", resume)).await;
        assert_eq!(status, StatusCode::OK);
        // 6 contact + 10 skills + 2 formatting
        assert_eq!(body["score"], 18);
        let keywords = body["keywords"].as_array().unwrap();
        assert!(keywords.contains(&json!("leadership")));
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let (status, body) = send(get_request("/api/v1/ats/keywords")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["keywords"].as_array().unwrap().contains(&json!("team")));
    }

    #[tokio::test]
    async fn test_jobs_fall_back_when_source_is_down() {
        let (status, body) =
            send(get_request("/api/v1/jobs?query=developer&location=Hyderabad")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["succeeded"], false);
        assert!(body["errorMessage"]
            .as_str()
            .unwrap()
            .contains("No listings found"));
        assert_eq!(body["items"][0]["company"], "Freshworks");
    }

    #[tokio::test]
    async fn test_jobs_rejects_oversized_query() {
        let uri = format!("/api/v1/jobs?query={}", "a".repeat(201));
        let (status, body) = send(get_request(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_email_validates_recipient() {
        let request = post_json(
            "/api/v1/email",
            json!({ "to": "not-an-address", "subject": "Hi", "html": "<p>x</p>" }),
        );
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_email_without_relay_is_unavailable() {
        let request = post_json(
            "/api/v1/email",
            json!({ "to": "asha@example.com", "subject": "Hi", "html": "<p>x</p>" }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = send(get_request("/getJobs/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
