//! Axum route handlers for the email relay API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::mail_client::{is_plausible_address, OutgoingEmail};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: Option<String>,
}

/// POST /api/v1/email
///
/// Relays an HTML email through the transactional mail provider.
pub async fn handle_send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, AppError> {
    if !is_plausible_address(&request.to) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            request.to
        )));
    }
    if request.subject.trim().is_empty() {
        return Err(AppError::Validation("subject cannot be empty".to_string()));
    }
    if request.html.trim().is_empty() {
        return Err(AppError::Validation("html cannot be empty".to_string()));
    }

    let email = OutgoingEmail {
        to: request.to.trim().to_string(),
        subject: request.subject,
        html: request.html,
    };
    let message_id = state.mail.send(&email).await?;
    info!("Relayed email to {}", email.to);

    Ok(Json(SendEmailResponse {
        success: true,
        message_id,
    }))
}
