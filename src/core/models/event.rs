use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{RecordKey, Resource};
use crate::core::error::ApiError;
use crate::core::filter::Searchable;

pub const EVENT_TYPES: [(&str, &str); 4] = [
    ("workshop", "Workshop"),
    ("webinar", "Webinar"),
    ("meeting", "Meeting"),
    ("presentation", "Presentation"),
];

pub fn event_type_class(kind: &str) -> &'static str {
    match kind {
        "workshop" => "badge badge-blue",
        "webinar" => "badge badge-green",
        "meeting" => "badge badge-yellow",
        "presentation" => "badge badge-purple",
        _ => "badge badge-gray",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(flatten)]
    pub key: RecordKey,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Event {
    const PATH: &'static str = "/events";
    const LIST_KEY: &'static str = "events";
    const ITEM_KEY: &'static str = "event";

    fn key(&self) -> &RecordKey {
        &self.key
    }
}

impl Searchable for Event {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.location]
    }

    fn matches_selection(&self, selection: &str) -> bool {
        self.kind == selection
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub attendees: u32,
    pub kind: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            attendees: 0,
            kind: "workshop".to_string(),
        }
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            attendees: event.attendees,
            kind: event.kind.clone(),
        }
    }
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty()
            || self.date.is_empty()
            || self.time.is_empty()
            || self.location.is_empty()
        {
            return Err(ApiError::Validation(
                "Title, date, time and location are required".into(),
            ));
        }
        Ok(())
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("date", self.date.clone()),
            ("time", self.time.clone()),
            ("location", self.location.clone()),
            ("attendees", self.attendees.to_string()),
            ("type", self.kind.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_round_trips_through_kind() {
        let event: Event = serde_json::from_str(
            r#"{"_id":"e1","title":"Rust meetup","date":"2024-09-12","time":"18:00",
                "location":"Berlin","attendees":40,"type":"meeting"}"#,
        )
        .unwrap();
        assert_eq!(event.kind, "meeting");
        assert!(event.matches_selection("meeting"));
        assert_eq!(event_type_class(&event.kind), "badge badge-yellow");
    }

    #[test]
    fn draft_requires_schedule_and_place() {
        let draft = EventDraft { title: "Demo day".into(), date: "2024-01-01".into(), ..Default::default() };
        assert!(draft.validate().is_err());
        let draft = EventDraft { time: "09:00".into(), location: "HQ".into(), ..draft };
        assert!(draft.validate().is_ok());
        assert!(draft.form_fields().contains(&("type", "workshop".to_string())));
    }
}
