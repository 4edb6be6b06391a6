use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::mail_client::MailClient;
use crate::models::job::{JobListing, SearchQuery};
use crate::notify::auth::AuthContext;
use crate::notify::templates::job_alert_email;
use crate::search::source::{Notifier, NotifyError};

/// Emails search results to the signed-up user through the mail relay.
pub struct EmailNotifier {
    mail: MailClient,
    auth: Arc<dyn AuthContext>,
}

impl EmailNotifier {
    pub fn new(mail: MailClient, auth: Arc<dyn AuthContext>) -> Self {
        Self { mail, auth }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, items: &[JobListing], query: &SearchQuery) -> Result<(), NotifyError> {
        let Some(to) = self.auth.notification_address() else {
            debug!("No notification address; skipping job alert");
            return Ok(());
        };

        let email = job_alert_email(&to, items, query, Utc::now());
        let message_id = self.mail.send(&email).await?;
        info!(
            "Job alert with {} listings sent to {} (message id {:?})",
            items.len(),
            to,
            message_id
        );
        Ok(())
    }
}
