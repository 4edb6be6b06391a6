use crate::mail_client::MailClient;
use crate::search::SearchClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Deduplicating job search client. Clones share one in-flight map.
    pub search: SearchClient,
    pub mail: MailClient,
}
