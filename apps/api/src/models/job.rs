use serde::{Deserialize, Serialize};

pub const DEFAULT_QUERY_TEXT: &str = "software developer";
pub const DEFAULT_LOCATION: &str = "India";

/// A job search request. Normalize before using it as a dedup key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub location: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: location.into(),
        }
    }

    /// Trims both fields and substitutes defaults for blank ones.
    pub fn normalized(&self) -> Self {
        let text = self.text.trim();
        let location = self.location.trim();
        Self {
            text: if text.is_empty() { DEFAULT_QUERY_TEXT } else { text }.to_string(),
            location: if location.is_empty() {
                DEFAULT_LOCATION
            } else {
                location
            }
            .to_string(),
        }
    }

    /// Case-insensitive key identifying identical in-flight searches.
    /// The fields stay separate so no text can spill into the location.
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.text.trim().to_lowercase(),
            self.location.trim().to_lowercase(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub posted: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub items: Vec<JobListing>,
    pub succeeded: bool,
    pub error_message: Option<String>,
}

impl SearchResult {
    pub fn ok(items: Vec<JobListing>) -> Self {
        Self {
            items,
            succeeded: true,
            error_message: None,
        }
    }

    pub fn failed(items: Vec<JobListing>, message: impl Into<String>) -> Self {
        Self {
            items,
            succeeded: false,
            error_message: Some(message.into()),
        }
    }
}
