//! Collaborators of the search client.
//!
//! The client only knows these traits; the scraper, the canned listings and
//! the email notifier are swappable implementations held as `Arc<dyn …>`.

use async_trait::async_trait;
use thiserror::Error;

use crate::mail_client::MailError;
use crate::models::job::{JobListing, SearchQuery, SearchResult};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{board} returned status {status}")]
    Status { board: String, status: u16 },

    #[error("No listings found on any job board ({boards} tried)")]
    NoListings { boards: usize },

    #[error("Job source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

/// Where live listings come from. Implementations own their own timeouts.
#[async_trait]
pub trait RemoteJobSource: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobListing>, SourceError>;
}

/// Local listings served when the remote source fails.
/// Always returns `succeeded: false`.
pub trait StaticFallbackProvider: Send + Sync {
    fn get(&self, query: &SearchQuery) -> SearchResult;
}

/// Side channel invoked after a successful, non-empty search.
/// Failures are logged by the caller and never fail the search.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, items: &[JobListing], query: &SearchQuery) -> Result<(), NotifyError>;
}

/// Notifier that does nothing, for clients without alerting.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _items: &[JobListing], _query: &SearchQuery) -> Result<(), NotifyError> {
        Ok(())
    }
}
