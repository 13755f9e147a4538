use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{RecordKey, Resource};
use crate::core::error::ApiError;
use crate::core::filter::Searchable;

// Select values of the contact triage filter
pub const FILTER_NEW: &str = "new";
pub const FILTER_RESPONDED: &str = "responded";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_interest: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub responded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn or_not_available(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

impl Contact {
    pub fn company_label(&self) -> String {
        or_not_available(&self.company)
    }

    pub fn service_label(&self) -> String {
        or_not_available(&self.service_interest)
    }
}

impl Resource for Contact {
    const PATH: &'static str = "/contacts";
    const LIST_KEY: &'static str = "contacts";
    const ITEM_KEY: &'static str = "contact";

    fn key(&self) -> &RecordKey {
        &self.key
    }
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.message]
    }

    fn matches_selection(&self, selection: &str) -> bool {
        match selection {
            FILTER_NEW => !self.responded,
            FILTER_RESPONDED => self.responded,
            _ => false,
        }
    }
}

pub fn validate_response(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::Validation("Response cannot be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triage_filter_splits_on_responded() {
        let fresh: Contact =
            serde_json::from_str(r#"{"_id":"c1","name":"Kim","email":"k@x.io","message":"Quote?"}"#)
                .unwrap();
        assert!(fresh.matches_selection(FILTER_NEW));
        assert!(!fresh.matches_selection(FILTER_RESPONDED));

        let answered = Contact { responded: true, ..fresh };
        assert!(answered.matches_selection(FILTER_RESPONDED));
    }

    #[test]
    fn optional_details_fall_back_to_not_available() {
        let contact: Contact = serde_json::from_str(
            r#"{"_id":"c2","name":"Lee","company":"Acme","serviceInterest":"  ","message":"Hi"}"#,
        )
        .unwrap();
        assert_eq!(contact.company_label(), "Acme");
        assert_eq!(contact.service_label(), "N/A");

        let bare: Contact = serde_json::from_str(r#"{"_id":"c3","name":"Max"}"#).unwrap();
        assert_eq!(bare.company_label(), "N/A");
        assert_eq!(bare.service_interest, None);
    }

    #[test]
    fn blank_response_is_rejected() {
        assert!(validate_response("  \n").is_err());
        assert!(validate_response("Thanks!").is_ok());
    }
}
