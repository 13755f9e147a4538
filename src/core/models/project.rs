use serde::{Deserialize, Serialize};

use super::record::{RecordKey, Resource};
use crate::core::error::ApiError;
use crate::core::filter::Searchable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "badge badge-yellow",
            ProjectStatus::InProgress => "badge badge-blue",
            ProjectStatus::Completed => "badge badge-green",
            ProjectStatus::OnHold => "badge badge-gray",
        }
    }

    pub fn all() -> [ProjectStatus; 4] {
        [
            ProjectStatus::Planning,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::OnHold,
        ]
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub key: RecordKey,
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub team: u32,
    #[serde(default)]
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Project {
    const PATH: &'static str = "/projects";
    const LIST_KEY: &'static str = "projects";
    const ITEM_KEY: &'static str = "project";

    fn key(&self) -> &RecordKey {
        &self.key
    }
}

impl Searchable for Project {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.client]
    }

    fn matches_selection(&self, selection: &str) -> bool {
        self.status.as_str() == selection
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    pub progress: u8,
    pub team: u32,
    pub deadline: String,
    pub description: String,
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            client: project.client.clone(),
            status: project.status,
            progress: project.progress,
            team: project.team,
            deadline: project.deadline.clone(),
            description: project.description.clone().unwrap_or_default(),
        }
    }
}

impl ProjectDraft {
    pub fn set_progress(&mut self, raw: &str) {
        self.progress = raw.trim().parse::<u32>().map(|p| p.min(100) as u8).unwrap_or(0);
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() || self.client.trim().is_empty() {
            return Err(ApiError::Validation("Project name and client are required".into()));
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
    fn progress_is_clamped_to_percent() {
        let mut draft = ProjectDraft::default();
        draft.set_progress("140");
        assert_eq!(draft.progress, 100);
        draft.set_progress("abc");
        assert_eq!(draft.progress, 0);
        draft.set_progress(" 35 ");
        assert_eq!(draft.progress, 35);
    }

    #[test]
    fn draft_needs_name_and_client() {
        let draft = ProjectDraft { name: "CRM".into(), ..Default::default() };
        assert!(draft.validate().is_err());
        let draft = ProjectDraft { client: "Acme".into(), ..draft };
        assert!(draft.validate().is_ok());
        assert_eq!(draft.to_payload()["status"], "planning");
    }
}
