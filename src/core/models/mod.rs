pub mod blog;
pub mod contact;
pub mod developer;
pub mod event;
pub mod newsletter;
pub mod project;
pub mod record;
pub mod task;
pub mod user;

use chrono::{DateTime, Utc};

pub use blog::{Blog, BlogDraft};
pub use contact::Contact;
pub use developer::{Availability, Developer, DeveloperDraft};
pub use event::{Event, EventDraft};
pub use newsletter::{Newsletter, NewsletterDraft};
pub use project::{Project, ProjectDraft, ProjectStatus};
pub use record::{RecordId, RecordKey, Resource};
pub use task::{Priority, Task, TaskDraft, TaskStatus};
pub use user::User;

pub fn display_date(at: &Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%b %-d, %Y").to_string()).unwrap_or_default()
}
