use serde::{Deserialize, Serialize};

use super::record::{RecordKey, Resource};
use crate::core::error::ApiError;
use crate::core::filter::Searchable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Active,
    Busy,
    Vacation,
    Offline,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Active => "active",
            Availability::Busy => "busy",
            Availability::Vacation => "vacation",
            Availability::Offline => "offline",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Active => "Active",
            Availability::Busy => "Busy",
            Availability::Vacation => "Vacation",
            Availability::Offline => "Offline",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Availability::Active => "badge badge-green",
            Availability::Busy => "badge badge-yellow",
            Availability::Vacation => "badge badge-blue",
            Availability::Offline => "badge badge-gray",
        }
    }

    pub fn all() -> [Availability; 4] {
        [
            Availability::Active,
            Availability::Busy,
            Availability::Vacation,
            Availability::Offline,
        ]
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.as_str() == value)
    }
}

pub const ROLES: [(&str, &str); 3] = [
    ("developer", "Developer"),
    ("admin", "Admin"),
    ("superadmin", "Super Admin"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    #[serde(flatten)]
    pub key: RecordKey,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub status: Availability,
    #[serde(default)]
    pub projects: u32,
    #[serde(default)]
    pub tasks: u32,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Developer {
    // Two-letter monogram shown when no avatar image is set
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

impl Resource for Developer {
    const PATH: &'static str = "/team";
    const LIST_KEY: &'static str = "admins";
    const ITEM_KEY: &'static str = "admin";

    fn key(&self) -> &RecordKey {
        &self.key
    }
}

impl Searchable for Developer {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.role, &self.email]
    }

    fn matches_selection(&self, selection: &str) -> bool {
        self.status.as_str() == selection
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub rate: String,
    pub status: Availability,
    pub phone: String,
    pub avatar: String,
    pub skills: Vec<String>,
    pub bio: String,
}

impl Default for DeveloperDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: "developer".to_string(),
            rate: String::new(),
            status: Availability::Active,
            phone: String::new(),
            avatar: String::new(),
            skills: Vec::new(),
            bio: String::new(),
        }
    }
}

impl From<&Developer> for DeveloperDraft {
    fn from(dev: &Developer) -> Self {
        Self {
            name: dev.name.clone(),
            email: dev.email.clone(),
            role: dev.role.clone(),
            rate: dev.rate.clone(),
            status: dev.status,
            phone: dev.phone.clone().unwrap_or_default(),
            avatar: dev.avatar.clone(),
            skills: dev.skills.clone(),
            bio: dev.bio.clone().unwrap_or_default(),
        }
    }
}

impl DeveloperDraft {
    // Returns false when the skill is blank or already listed
    pub fn add_skill(&mut self, raw: &str) -> bool {
        let skill = raw.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ApiError::Validation("Name and email are required".into()));
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
    fn skills_are_trimmed_and_unique() {
        let mut draft = DeveloperDraft::default();
        assert!(draft.add_skill(" Rust "));
        assert!(!draft.add_skill("Rust"));
        assert!(!draft.add_skill("   "));
        assert!(draft.add_skill("SQL"));
        draft.remove_skill("Rust");
        assert_eq!(draft.skills, vec!["SQL".to_string()]);
    }

    #[test]
    fn developer_list_uses_admin_envelope() {
        assert_eq!(Developer::LIST_KEY, "admins");
        let dev: Developer = serde_json::from_str(
            r#"{"_id":"d1","name":"grace hopper","email":"g@x.io","status":"vacation"}"#,
        )
        .unwrap();
        assert_eq!(dev.status, Availability::Vacation);
        assert_eq!(dev.initials(), "GH");
    }
}
