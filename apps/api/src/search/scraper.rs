//! Best-effort scraping of public job board search pages.
//!
//! Every board has its own selector set. Boards are queried concurrently and
//! any board that errors or changes its markup simply contributes nothing.
//! When no board yields a listing the fetch fails, and the search client
//! serves the fallback listings instead.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::models::job::{JobListing, SearchQuery};
use crate::search::source::{RemoteJobSource, SourceError};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const UNDISCLOSED: &str = "Not disclosed";

#[derive(Debug, Clone)]
pub struct BoardSelectors {
    pub card: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub link: &'static str,
    pub salary: Option<&'static str>,
}

/// A job board search page and how to read it.
#[derive(Debug, Clone)]
pub struct JobBoard {
    pub name: &'static str,
    pub search_url: String,
    pub query_param: &'static str,
    pub location_param: &'static str,
    pub selectors: BoardSelectors,
}

impl JobBoard {
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &self.search_url,
            &[
                (self.query_param, query.text.as_str()),
                (self.location_param, query.location.as_str()),
            ],
        )
    }
}

/// Indian job boards that render listings server-side.
pub fn default_boards() -> Vec<JobBoard> {
    vec![
        JobBoard {
            name: "TimesJobs",
            search_url: "https://www.timesjobs.com/candidate/job-search.html".to_string(),
            query_param: "txtKeywords",
            location_param: "txtLocation",
            selectors: BoardSelectors {
                card: "li.job-bx",
                title: "h2 a",
                company: "h3.joblist-comp-name",
                location: "ul.top-jd-dtl li span",
                link: "h2 a",
                salary: Some("ul.top-jd-dtl li:nth-child(2)"),
            },
        },
        JobBoard {
            name: "Indeed",
            search_url: "https://in.indeed.com/jobs".to_string(),
            query_param: "q",
            location_param: "l",
            selectors: BoardSelectors {
                card: "div.job_seen_beacon",
                title: "h2.jobTitle span",
                company: "[data-testid='company-name']",
                location: "[data-testid='text-location']",
                link: "h2.jobTitle a",
                salary: Some("[data-testid='attribute_snippet_testid']"),
            },
        },
    ]
}

pub struct ScrapingJobSource {
    client: Client,
    boards: Vec<JobBoard>,
    max_results: usize,
}

impl ScrapingJobSource {
    pub fn new(
        boards: Vec<JobBoard>,
        timeout: Duration,
        max_results: usize,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            boards,
            max_results,
        })
    }

    async fn fetch_board(
        &self,
        board: &JobBoard,
        query: &SearchQuery,
    ) -> Result<Vec<JobListing>, SourceError> {
        let url = board
            .search_url(query)
            .map_err(|e| SourceError::Unavailable(format!("{}: bad search URL: {e}", board.name)))?;
        debug!("Fetching {} search page: {}", board.name, url);

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                board: board.name.to_string(),
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(parse_listings(board, &url, &html))
    }
}

#[async_trait]
impl RemoteJobSource for ScrapingJobSource {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobListing>, SourceError> {
        let results = join_all(self.boards.iter().map(|b| self.fetch_board(b, query))).await;

        let mut listings = Vec::new();
        for (board, result) in self.boards.iter().zip(results) {
            match result {
                Ok(found) => {
                    info!("{} returned {} listings", board.name, found.len());
                    listings.extend(found);
                }
                Err(e) => warn!("{} scrape failed: {e}", board.name),
            }
        }

        let mut listings = dedup_listings(listings);
        listings.truncate(self.max_results);

        if listings.is_empty() {
            return Err(SourceError::NoListings {
                boards: self.boards.len(),
            });
        }
        Ok(listings)
    }
}

/// Extracts listings from one board's search page. Cards without a title are skipped.
pub fn parse_listings(board: &JobBoard, page_url: &Url, html: &str) -> Vec<JobListing> {
    let selectors = &board.selectors;
    let Ok(card_selector) = Selector::parse(selectors.card) else {
        warn!("{}: invalid card selector '{}'", board.name, selectors.card);
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&card_selector)
        .filter_map(|card| {
            let title = find_text(&card, selectors.title)?;
            let company = find_text(&card, selectors.company).unwrap_or_else(|| UNDISCLOSED.to_string());
            let location = find_text(&card, selectors.location).unwrap_or_default();
            let salary = selectors.salary.and_then(|s| find_text(&card, s));
            let url = find_link(&card, selectors.link, page_url)
                .unwrap_or_else(|| page_url.to_string());

            Some(JobListing {
                id: Uuid::new_v4().to_string(),
                title,
                company,
                location,
                url,
                description: None,
                salary,
                job_type: None,
                posted: None,
                source: board.name.to_string(),
            })
        })
        .collect()
}

fn find_text(card: &ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    card.select(&selector)
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .find(|text| !text.is_empty())
}

fn find_link(card: &ElementRef<'_>, selector: &str, page_url: &Url) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let href = card
        .select(&selector)
        .find_map(|el| el.value().attr("href"))?;
    page_url.join(href.trim()).ok().map(|u| u.to_string())
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops repeats of the same title at the same company, keeping the first.
fn dedup_listings(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|l| seen.insert((l.title.to_lowercase(), l.company.to_lowercase())))
        .collect()
}
