//! Canned Indian job listings served when live job boards are unavailable.

use crate::models::job::{JobListing, SearchQuery, SearchResult, DEFAULT_LOCATION};
use crate::search::source::StaticFallbackProvider;

pub const FALLBACK_NOTICE: &str = "Live job boards are unavailable; showing sample listings";

// title, company, location, salary, job type, description
const CANNED: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Software Developer",
        "Tata Consultancy Services",
        "Mumbai, Maharashtra",
        "₹4,00,000 - ₹7,00,000 a year",
        "Full-time",
        "Build and maintain enterprise applications in Java and Spring Boot.",
    ),
    (
        "Frontend Engineer",
        "Flipkart",
        "Bengaluru, Karnataka",
        "₹12,00,000 - ₹20,00,000 a year",
        "Full-time",
        "Own customer-facing React experiences for the checkout team.",
    ),
    (
        "Backend Engineer",
        "Razorpay",
        "Bengaluru, Karnataka",
        "₹15,00,000 - ₹28,00,000 a year",
        "Full-time",
        "Design payment APIs in Go and Rust with a focus on reliability.",
    ),
    (
        "Data Analyst",
        "Infosys",
        "Pune, Maharashtra",
        "₹5,00,000 - ₹9,00,000 a year",
        "Full-time",
        "Analyse client data with SQL, Python and Power BI dashboards.",
    ),
    (
        "DevOps Engineer",
        "Zoho",
        "Chennai, Tamil Nadu",
        "₹8,00,000 - ₹14,00,000 a year",
        "Full-time",
        "Automate deployment pipelines and manage Kubernetes clusters.",
    ),
    (
        "Full Stack Developer",
        "Freshworks",
        "Hyderabad, Telangana",
        "₹10,00,000 - ₹18,00,000 a year",
        "Full-time",
        "Ship features across a Node.js backend and React frontend.",
    ),
    (
        "Machine Learning Engineer",
        "Wipro",
        "Hyderabad, Telangana",
        "₹9,00,000 - ₹16,00,000 a year",
        "Full-time",
        "Train and deploy NLP models for customer support automation.",
    ),
    (
        "Software Engineering Intern",
        "Paytm",
        "Noida, Uttar Pradesh",
        "₹25,000 a month",
        "Internship",
        "Six-month internship on the payments platform team.",
    ),
    (
        "Mobile App Developer",
        "Swiggy",
        "Remote",
        "₹10,00,000 - ₹17,00,000 a year",
        "Full-time",
        "Build Android features in Kotlin for millions of daily users.",
    ),
    (
        "QA Automation Engineer",
        "HCLTech",
        "Gurugram, Haryana",
        "₹6,00,000 - ₹10,00,000 a year",
        "Contract",
        "Write Selenium and Playwright suites for banking products.",
    ),
];

/// Hard-coded listings, filtered by the query where possible.
pub struct CannedJobs {
    listings: Vec<JobListing>,
}

impl Default for CannedJobs {
    fn default() -> Self {
        let listings = CANNED
            .iter()
            .enumerate()
            .map(
                |(i, (title, company, location, salary, job_type, description))| JobListing {
                    id: format!("sample-{}", i + 1),
                    title: title.to_string(),
                    company: company.to_string(),
                    location: location.to_string(),
                    url: "https://www.naukri.com/".to_string(),
                    description: Some(description.to_string()),
                    salary: Some(salary.to_string()),
                    job_type: Some(job_type.to_string()),
                    posted: None,
                    source: "Sample".to_string(),
                },
            )
            .collect();
        Self { listings }
    }
}

impl CannedJobs {
    /// Listings whose title or description mentions a query term and whose
    /// location matches. Falls back to the whole list when nothing matches.
    pub fn matching(&self, query: &SearchQuery) -> Vec<JobListing> {
        let terms: Vec<String> = query
            .text
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|t| t.len() >= 3)
            .collect();
        let location = query.location.trim().to_lowercase();
        let any_location = location.is_empty() || location == DEFAULT_LOCATION.to_lowercase();

        let matched: Vec<JobListing> = self
            .listings
            .iter()
            .filter(|job| {
                let haystack = format!(
                    "{} {}",
                    job.title,
                    job.description.as_deref().unwrap_or_default()
                )
                .to_lowercase();
                let text_ok = terms.is_empty() || terms.iter().any(|t| haystack.contains(t));
                let location_ok =
                    any_location || job.location.to_lowercase().contains(&location);
                text_ok && location_ok
            })
            .cloned()
            .collect();

        if matched.is_empty() {
            self.listings.clone()
        } else {
            matched
        }
    }
}

impl StaticFallbackProvider for CannedJobs {
    fn get(&self, query: &SearchQuery) -> SearchResult {
        SearchResult::failed(self.matching(query), FALLBACK_NOTICE)
    }
}
