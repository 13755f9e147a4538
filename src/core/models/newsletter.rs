use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{RecordKey, Resource};
use crate::core::error::ApiError;
use crate::core::filter::Searchable;

pub const NEWSLETTER_STATUSES: [(&str, &str); 3] =
    [("draft", "Draft"), ("sent", "Sent"), ("scheduled", "Scheduled")];

pub fn newsletter_status_class(status: &str) -> &'static str {
    match status {
        "sent" => "badge badge-green",
        "scheduled" => "badge badge-blue",
        "draft" => "badge badge-yellow",
        _ => "badge badge-gray",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newsletter {
    #[serde(flatten)]
    pub key: RecordKey,
    pub title: String,
    #[serde(default)]
    pub subscribers: u32,
    #[serde(default)]
    pub last_sent: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub open_rate: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Newsletter {
    pub fn is_sent(&self) -> bool {
        self.status == "sent"
    }
}

impl Resource for Newsletter {
    const PATH: &'static str = "/newsletters";
    const LIST_KEY: &'static str = "newsletters";
    const ITEM_KEY: &'static str = "newsletter";

    fn key(&self) -> &RecordKey {
        &self.key
    }
}

impl Searchable for Newsletter {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title]
    }

    fn matches_selection(&self, selection: &str) -> bool {
        self.status == selection
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsletterDraft {
    pub title: String,
    pub subscribers: u32,
    pub last_sent: String,
    pub status: String,
    pub open_rate: String,
}

impl Default for NewsletterDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            subscribers: 0,
            last_sent: String::new(),
            status: "draft".to_string(),
            open_rate: String::new(),
        }
    }
}

impl From<&Newsletter> for NewsletterDraft {
    fn from(n: &Newsletter) -> Self {
        Self {
            title: n.title.clone(),
            subscribers: n.subscribers,
            last_sent: n.last_sent.clone(),
            status: n.status.clone(),
            open_rate: n.open_rate.clone(),
        }
    }
}

impl NewsletterDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("Title is required".into()));
        }
        Ok(())
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("subscribers", self.subscribers.to_string()),
            ("lastSent", self.last_sent.clone()),
            ("status", self.status.clone()),
            ("openRate", self.open_rate.clone()),
        ]
    }
}
