use chrono::{DateTime, Utc};

use crate::mail_client::OutgoingEmail;
use crate::models::job::{JobListing, SearchQuery};

/// Escapes text for interpolation into HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn job_alert_subject(count: usize, query: &SearchQuery) -> String {
    let noun = if count == 1 { "job" } else { "jobs" };
    format!(
        "{count} new {noun} for \"{}\" in {}",
        query.text, query.location
    )
}

fn listing_row(job: &JobListing) -> String {
    let mut details = vec![escape_html(&job.company)];
    if !job.location.is_empty() {
        details.push(escape_html(&job.location));
    }
    if let Some(salary) = &job.salary {
        details.push(escape_html(salary));
    }
    format!(
        "<li style=\"margin-bottom:12px\"><a href=\"{}\"><strong>{}</strong></a><br>{}</li>",
        escape_html(&job.url),
        escape_html(&job.title),
        details.join(" · ")
    )
}

/// Renders the job alert email for a completed search.
pub fn job_alert_email(
    to: &str,
    items: &[JobListing],
    query: &SearchQuery,
    sent_at: DateTime<Utc>,
) -> OutgoingEmail {
    let rows: String = items.iter().map(listing_row).collect();
    let html = format!(
        "<html><body style=\"font-family:sans-serif\">\
         <h2>Job matches for {}</h2>\
         <p>We found {} listings in {}.</p>\
         <ul style=\"padding-left:16px\">{rows}</ul>\
         <p style=\"color:#888;font-size:12px\">Sent {}</p>\
         </body></html>",
        escape_html(&query.text),
        items.len(),
        escape_html(&query.location),
        sent_at.format("%d %b %Y %H:%M UTC"),
    );

    OutgoingEmail {
        to: to.to_string(),
        subject: job_alert_subject(items.len(), query),
        html,
    }
}
