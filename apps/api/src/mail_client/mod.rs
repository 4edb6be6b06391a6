/// Mail client: single entry point for the transactional mail relay.
///
/// No other module may call the mail provider directly; notifications and the
/// email endpoint both go through `MailClient::send`.
///
/// Wire format follows the Brevo transactional email API
/// (`sender`, `to`, `subject`, `htmlContent`, authenticated via `api-key`).
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_MAIL_API_URL: &str = "https://api.brevo.com/v3/smtp/email";
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 1000;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail relay is not configured (MAIL_API_KEY missing)")]
    NotConfigured,

    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// An email ready to hand to the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    #[serde(rename = "htmlContent")]
    html_content: &'a str,
}

#[derive(Debug, Serialize)]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(rename = "messageId")]
    message_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    message: String,
}

/// Wraps the mail relay HTTP API with retry logic.
#[derive(Clone)]
pub struct MailClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    sender_email: String,
    sender_name: String,
    base_backoff: Duration,
}

impl MailClient {
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        sender_email: String,
        sender_name: String,
    ) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_url,
            api_key,
            sender_email,
            sender_name,
            base_backoff: Duration::from_millis(BASE_BACKOFF_MS),
        })
    }

    #[cfg(test)]
    fn with_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body<'a>(&'a self, email: &'a OutgoingEmail) -> RelayRequest<'a> {
        RelayRequest {
            sender: Contact {
                email: &self.sender_email,
                name: Some(&self.sender_name),
            },
            to: vec![Contact {
                email: &email.to,
                name: None,
            }],
            subject: &email.subject,
            html_content: &email.html,
        }
    }

    /// Sends one email, returning the provider's message id when it reports one.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, MailError> {
        let api_key = self.api_key.as_deref().ok_or(MailError::NotConfigured)?;
        if !is_plausible_address(&email.to) {
            return Err(MailError::InvalidRecipient(email.to.clone()));
        }

        let body = self.request_body(email);
        let mut last_error: Option<MailError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = self.base_backoff * (1 << (attempt - 1));
                warn!(
                    "Mail send attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .header("api-key", api_key)
                .header("accept", "application/json")
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(MailError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if is_retryable(status.as_u16()) {
                let text = response.text().await.unwrap_or_default();
                warn!("Mail API returned {}: {}", status, text);
                last_error = Some(MailError::Api {
                    status: status.as_u16(),
                    message: text,
                });
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(MailError::Api {
                    status: status.as_u16(),
                    message: parse_error_message(text),
                });
            }

            let text = response.text().await.unwrap_or_default();
            let message_id = serde_json::from_str::<RelayResponse>(&text)
                .ok()
                .and_then(|r| r.message_id);

            debug!("Mail relayed to {} (message id {:?})", email.to, message_id);
            return Ok(message_id);
        }

        Err(last_error.unwrap_or(MailError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

fn parse_error_message(body: String) -> String {
    serde_json::from_str::<RelayErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body)
}

/// Minimal shape check: something before and after a single `@`, and a dot in the domain.
pub fn is_plausible_address(address: &str) -> bool {
    let address = address.trim();
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !address.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Server, ServerGuard};

    fn client(api_key: Option<&str>) -> MailClient {
        MailClient::new(
            "http://127.0.0.1:9/v3/smtp/email".to_string(),
            api_key.map(str::to_string),
            "alerts@jobportal.in".to_string(),
            "Job Portal".to_string(),
        )
        .unwrap()
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "New jobs".to_string(),
            html: "<p>hello</p>".to_string(),
        }
    }

    #[test]
    fn test_request_body_matches_relay_format() {
        let client = client(Some("key"));
        let email = email("asha@example.com");
        let json = serde_json::to_value(client.request_body(&email)).unwrap();
        assert_eq!(json["sender"]["email"], "alerts@jobportal.in");
        assert_eq!(json["sender"]["name"], "Job Portal");
        assert_eq!(json["to"][0]["email"], "asha@example.com");
        assert!(json["to"][0].get("name").is_none());
        assert_eq!(json["htmlContent"], "<p>hello</p>");
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(429));
        assert!(is_retryable(503));
        assert!(!is_retryable(400));
        assert!(!is_retryable(201));
    }

    #[test]
    fn test_parse_error_message_falls_back_to_body() {
        let parsed = parse_error_message(r#"{"code":"unauthorized","message":"Key not found"}"#.to_string());
        assert_eq!(parsed, "Key not found");
        assert_eq!(parse_error_message("plain".to_string()), "plain");
    }

    #[test]
    fn test_plausible_addresses() {
        assert!(is_plausible_address("asha@example.com"));
        assert!(!is_plausible_address("asha.example.com"));
        assert!(!is_plausible_address("@example.com"));
        assert!(!is_plausible_address("asha@example"));
        assert!(!is_plausible_address("as ha@example.com"));
    }

    #[tokio::test]
    async fn test_send_without_api_key_is_not_configured() {
        let err = client(None).send(&email("asha@example.com")).await.unwrap_err();
        assert!(matches!(err, MailError::NotConfigured));
    }

    const RELAY_PATH: &str = "/v3/smtp/email";

    fn relay(server: &ServerGuard) -> MailClient {
        MailClient::new(
            format!("{}{RELAY_PATH}", server.url()),
            Some("test-key".to_string()),
            "alerts@jobportal.in".to_string(),
            "Job Portal".to_string(),
        )
        .unwrap()
        .with_backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_default_backoff_doubles_from_one_second() {
        let client = client(Some("key"));
        assert_eq!(client.base_backoff, Duration::from_secs(1));
        assert_eq!(client.base_backoff * (1 << 1), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_send_retries_rate_limit_and_server_errors() {
        let mut server = Server::new_async().await;
        let rate_limited = server
            .mock("POST", RELAY_PATH)
            .match_header("api-key", "test-key")
            .with_status(429)
            .expect(1)
            .create_async()
            .await;
        let unavailable = server
            .mock("POST", RELAY_PATH)
            .match_header("api-key", "test-key")
            .with_status(503)
            .with_body("upstream down")
            .expect(1)
            .create_async()
            .await;
        let accepted = server
            .mock("POST", RELAY_PATH)
            .match_header("api-key", "test-key")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"messageId":"<202610161200.12345@smtp-relay.mailin.fr>"}"#)
            .expect(1)
            .create_async()
            .await;

        let message_id = relay(&server)
            .send(&email("asha@example.com"))
            .await
            .unwrap();

        assert_eq!(
            message_id.as_deref(),
            Some("<202610161200.12345@smtp-relay.mailin.fr>")
        );
        rate_limited.assert_async().await;
        unavailable.assert_async().await;
        accepted.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_gives_up_after_three_attempts() {
        let mut server = Server::new_async().await;
        let unavailable = server
            .mock("POST", RELAY_PATH)
            .with_status(503)
            .with_body("maintenance")
            .expect(3)
            .create_async()
            .await;

        let err = relay(&server)
            .send(&email("asha@example.com"))
            .await
            .unwrap_err();

        match err {
            MailError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("Expected Api error, got: {other:?}"),
        }
        unavailable.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_error_is_parsed_and_not_retried() {
        let mut server = Server::new_async().await;
        let rejected = server
            .mock("POST", RELAY_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":"invalid_parameter","message":"sender is not valid"}"#)
            .expect(1)
            .create_async()
            .await;

        let err = relay(&server)
            .send(&email("asha@example.com"))
            .await
            .unwrap_err();

        match err {
            MailError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "sender is not valid");
            }
            other => panic!("Expected Api error, got: {other:?}"),
        }
        rejected.assert_async().await;
    }

    #[tokio::test]
    async fn test_success_without_message_id() {
        let mut server = Server::new_async().await;
        let _accepted = server
            .mock("POST", RELAY_PATH)
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let message_id = relay(&server)
            .send(&email("asha@example.com"))
            .await
            .unwrap();
        assert!(message_id.is_none());
    }

    #[tokio::test]
    async fn test_send_rejects_bad_recipient_before_network() {
        let err = client(Some("key")).send(&email("nobody")).await.unwrap_err();
        assert!(matches!(err, MailError::InvalidRecipient(_)));
    }
}
