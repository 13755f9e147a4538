use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::{RecordKey, Resource};
use crate::core::error::ApiError;
use crate::core::filter::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    // Wire value, also used as the select option value
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "badge badge-gray",
            TaskStatus::InProgress => "badge badge-blue",
            TaskStatus::Review => "badge badge-yellow",
            TaskStatus::Completed => "badge badge-green",
        }
    }

    // Board column order
    pub fn all() -> [TaskStatus; 4] {
        [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Completed,
        ]
    }
}

impl FromStr for TaskStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ApiError::Validation(format!("unknown task status '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::Low => "badge badge-blue",
            Priority::Medium => "badge badge-yellow",
            Priority::High => "badge badge-red",
        }
    }

    pub fn all() -> [Priority; 3] {
        [Priority::Low, Priority::Medium, Priority::High]
    }
}

impl FromStr for Priority {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::all()
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ApiError::Validation(format!("unknown priority '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(flatten)]
    pub key: RecordKey,
    pub title: String,
    pub project: String,
    pub assignee: String,
    #[serde(default)]
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Task {
    const PATH: &'static str = "/tasks";
    const LIST_KEY: &'static str = "tasks";
    const ITEM_KEY: &'static str = "task";

    fn key(&self) -> &RecordKey {
        &self.key
    }

    fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.project.is_empty() && !self.assignee.is_empty()
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.project, &self.assignee]
    }

    fn matches_selection(&self, selection: &str) -> bool {
        self.status.as_str() == selection
    }
}

// Form state for the create/edit task modal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub project: String,
    pub assignee: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: String,
    pub description: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            project: String::new(),
            assignee: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            due_date: String::new(),
            description: String::new(),
        }
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            project: task.project.clone(),
            assignee: task.assignee.clone(),
            priority: task.priority,
            status: task.status,
            due_date: task.due_date.clone(),
            description: task.description.clone().unwrap_or_default(),
        }
    }
}

impl TaskDraft {
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        for (label, value) in [
            ("Task title", &self.title),
            ("Project", &self.project),
            ("Assignee", &self.assignee),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::Validation(format!("{} is required", label)));
            }
        }
        Ok(())
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!("review".parse::<TaskStatus>().unwrap(), TaskStatus::Review);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn task_decodes_with_either_identifier() {
        let task: Task = serde_json::from_str(
            r#"{"_id":"t1","title":"Wire API","project":"Portal","assignee":"Ana",
                "priority":"high","status":"review","dueDate":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(task.record_id().unwrap().to_string(), "t1");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description, None);

        let task: Task = serde_json::from_str(
            r#"{"id":9,"title":"x","project":"p","assignee":"a","status":"todo"}"#,
        )
        .unwrap();
        assert_eq!(task.record_id().unwrap().to_string(), "9");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn draft_requires_title_project_and_assignee() {
        let mut draft = TaskDraft { title: "Ship".into(), project: "Site".into(), ..Default::default() };
        assert_eq!(
            draft.validate(),
            Err(ApiError::Validation("Assignee is required".into()))
        );
        draft.assignee = "  ".into();
        assert!(!draft.is_complete());
        draft.assignee = "Lee".into();
        assert!(draft.is_complete());
    }

    #[test]
    fn draft_payload_matches_wire_names() {
        let draft = TaskDraft { due_date: "2024-06-30".into(), ..Default::default() };
        let payload = draft.to_payload();
        assert_eq!(payload["dueDate"], "2024-06-30");
        assert_eq!(payload["status"], "todo");
        assert_eq!(payload["priority"], "medium");
    }
}
