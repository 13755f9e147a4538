use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{RecordKey, Resource};
use crate::core::error::ApiError;
use crate::core::filter::Searchable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    #[serde(default)]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(flatten)]
    pub key: RecordKey,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageMeta>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Blog {
    // First couple of lines for the list card
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut text: String = self.content.chars().take(max_chars).collect();
        if self.content.chars().count() > max_chars {
            text.push('…');
        }
        text
    }
}

impl Resource for Blog {
    const PATH: &'static str = "/blogs";
    const LIST_KEY: &'static str = "blogs";
    const ITEM_KEY: &'static str = "blog";

    fn key(&self) -> &RecordKey {
        &self.key
    }
}

impl Searchable for Blog {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.author.email]
    }

    fn matches_selection(&self, selection: &str) -> bool {
        self.tags.iter().any(|tag| tag == selection)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    // Comma separated, as typed
    pub tags: String,
    pub is_featured: bool,
}

impl From<&Blog> for BlogDraft {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            content: blog.content.clone(),
            tags: blog.tags.join(", "),
            is_featured: blog.is_featured,
        }
    }
}

impl BlogDraft {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ApiError::Validation("Title and content are required".into()));
        }
        Ok(())
    }

    // Text parts of the multipart body; the image file is appended separately
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            ("tags", serde_json::to_string(&self.tag_list()).unwrap_or_else(|_| "[]".into())),
            ("isFeatured", self.is_featured.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_split_trimmed_and_encoded_as_json() {
        let draft = BlogDraft {
            title: "Hello".into(),
            content: "World".into(),
            tags: " rust, ,web ,".into(),
            is_featured: true,
        };
        assert_eq!(draft.tag_list(), vec!["rust".to_string(), "web".to_string()]);
        let fields = draft.form_fields();
        assert!(fields.contains(&("tags", r#"["rust","web"]"#.to_string())));
        assert!(fields.contains(&("isFeatured", "true".to_string())));
    }

    #[test]
    fn title_and_content_are_required() {
        assert!(BlogDraft { title: "t".into(), ..Default::default() }.validate().is_err());
    }

    #[test]
    fn tag_filter_matches_exact_tag() {
        let blog: Blog = serde_json::from_str(
            r#"{"_id":"b1","title":"Release notes","tags":["release","rust"],
                "author":{"email":"ed@agency.io"},"createdAt":"2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(blog.matches_selection("rust"));
        assert!(!blog.matches_selection("rus"));
        assert!(blog.created_at.is_some());
    }

    #[test]
    fn excerpt_marks_truncation() {
        let blog = Blog {
            key: RecordKey::default(),
            title: "t".into(),
            content: "abcdef".into(),
            tags: vec![],
            is_featured: false,
            author: Author::default(),
            image: None,
            created_at: None,
        };
        assert_eq!(blog.excerpt(3), "abc…");
        assert_eq!(blog.excerpt(10), "abcdef");
    }
}
