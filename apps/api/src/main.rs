mod ats;
mod config;
mod errors;
mod mail_client;
mod models;
mod notify;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::mail_client::MailClient;
use crate::notify::{EmailNotifier, FixedRecipient};
use crate::routes::build_router;
use crate::search::fallback::CannedJobs;
use crate::search::scraper::{default_boards, ScrapingJobSource};
use crate::search::source::{NoopNotifier, Notifier};
use crate::search::SearchClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Mail relay
    let mail = MailClient::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_sender_email.clone(),
        config.mail_sender_name.clone(),
    )?;
    let notifier: Arc<dyn Notifier> = if mail.is_configured() {
        info!("Mail relay configured ({})", config.mail_api_url);
        let recipient = FixedRecipient::new(config.notify_email.clone());
        Arc::new(EmailNotifier::new(mail.clone(), Arc::new(recipient)))
    } else {
        warn!("MAIL_API_KEY not set; email relay and job alerts disabled");
        Arc::new(NoopNotifier)
    };

    // Job search: scraped boards with canned fallback
    let boards = default_boards();
    info!(
        "Job boards: {}",
        boards.iter().map(|b| b.name).collect::<Vec<_>>().join(", ")
    );
    let source = ScrapingJobSource::new(
        boards,
        Duration::from_secs(config.scrape_timeout_secs),
        config.search_max_results,
    )?;
    let search = SearchClient::new(Arc::new(source), Arc::new(CannedJobs::default()), notifier);

    let state = AppState { search, mail };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
