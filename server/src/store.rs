//! JSON document store behind the REST API.
//!
//! Records are kept as loose JSON objects so fields the dashboard adds later
//! survive a round trip. Every mutation is written back to a single snapshot
//! file (temp file + rename); blog images are stored as files beside it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Team,
    Projects,
    Tasks,
    Blogs,
    Events,
    Newsletters,
    Contacts,
}

impl Collection {
    pub fn all() -> [Collection; 7] {
        [
            Collection::Team,
            Collection::Projects,
            Collection::Tasks,
            Collection::Blogs,
            Collection::Events,
            Collection::Newsletters,
            Collection::Contacts,
        ]
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.path() == segment)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Collection::Team => "team",
            Collection::Projects => "projects",
            Collection::Tasks => "tasks",
            Collection::Blogs => "blogs",
            Collection::Events => "events",
            Collection::Newsletters => "newsletters",
            Collection::Contacts => "contacts",
        }
    }

    // Envelope keys of list and single-record responses
    pub fn list_key(&self) -> &'static str {
        match self {
            Collection::Team => "admins",
            other => other.path(),
        }
    }

    pub fn item_key(&self) -> &'static str {
        match self {
            Collection::Team => "admin",
            Collection::Projects => "project",
            Collection::Tasks => "task",
            Collection::Blogs => "blog",
            Collection::Events => "event",
            Collection::Newsletters => "newsletter",
            Collection::Contacts => "contact",
        }
    }

    fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Team => &["name", "email"],
            Collection::Projects => &["name", "client"],
            Collection::Tasks => &["title", "project", "assignee"],
            Collection::Blogs => &["title", "content"],
            Collection::Events => &["title", "date", "time", "location"],
            Collection::Newsletters => &["title"],
            Collection::Contacts => &["name", "email", "message"],
        }
    }

    // Closed value sets; anything else is rejected
    fn enum_fields(&self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Collection::Team => &[
                ("status", &["active", "busy", "vacation", "offline"]),
                ("role", &["developer", "admin", "superadmin"]),
            ],
            Collection::Projects => &[("status", &["planning", "in-progress", "completed", "on-hold"])],
            Collection::Tasks => &[
                ("status", &["todo", "in-progress", "review", "completed"]),
                ("priority", &["low", "medium", "high"]),
            ],
            Collection::Events => &[("type", &["workshop", "webinar", "meeting", "presentation"])],
            Collection::Newsletters => &[("status", &["draft", "sent", "scheduled"])],
            Collection::Blogs | Collection::Contacts => &[],
        }
    }

    fn defaults(&self) -> Vec<(&'static str, Value)> {
        match self {
            Collection::Team => vec![
                ("role", json!("developer")),
                ("status", json!("active")),
                ("projects", json!(0)),
                ("tasks", json!(0)),
                ("skills", json!([])),
            ],
            Collection::Projects => vec![("status", json!("planning")), ("progress", json!(0)), ("team", json!(0))],
            Collection::Tasks => vec![("status", json!("todo")), ("priority", json!("medium"))],
            Collection::Blogs => vec![("tags", json!([])), ("isFeatured", json!(false))],
            Collection::Events => vec![("type", json!("workshop")), ("attendees", json!(0))],
            Collection::Newsletters => vec![("status", json!("draft")), ("subscribers", json!(0))],
            Collection::Contacts => vec![("responded", json!(false))],
        }
    }

    fn label(&self) -> &'static str {
        self.item_key()
    }
}

// Matches either identifier a record may carry
fn has_id(record: &Value, id: &str) -> bool {
    match (record.get("_id"), record.get("id")) {
        (Some(Value::String(s)), _) if s == id => true,
        (_, Some(Value::Number(n))) => n.to_string() == id,
        (_, Some(Value::String(s))) => s == id,
        _ => false,
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub collections: BTreeMap<Collection, Vec<Value>>,
}

impl StoreData {
    pub fn list(&self, collection: Collection) -> Vec<Value> {
        self.collections.get(&collection).cloned().unwrap_or_default()
    }

    pub fn get(&self, collection: Collection, id: &str) -> Result<Value> {
        self.collections
            .get(&collection)
            .and_then(|records| records.iter().find(|r| has_id(r, id)))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(collection.label().to_string()))
    }

    fn record_mut(&mut self, collection: Collection, id: &str) -> Result<&mut Map<String, Value>> {
        self.collections
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|r| has_id(r, id)))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::NotFound(collection.label().to_string()))
    }

    fn check_enums(collection: Collection, fields: &Map<String, Value>) -> Result<()> {
        for (field, allowed) in collection.enum_fields() {
            if let Some(value) = fields.get(*field) {
                let ok = value.as_str().is_some_and(|v| allowed.contains(&v));
                if !ok {
                    return Err(StoreError::BadRequest(format!(
                        "{} must be one of {}",
                        field,
                        allowed.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate and store a new record; the store assigns `_id` and timestamps.
    pub fn insert(&mut self, collection: Collection, mut fields: Map<String, Value>, now: DateTime<Utc>) -> Result<Value> {
        for field in collection.required_fields() {
            if is_blank(fields.get(*field)) {
                return Err(StoreError::BadRequest(format!("{} is required", field)));
            }
        }
        Self::check_enums(collection, &fields)?;

        for (field, value) in collection.defaults() {
            fields.entry(field).or_insert(value);
        }
        fields.remove("id");
        fields.insert("_id".into(), json!(Uuid::new_v4().to_string()));
        fields.insert("createdAt".into(), json!(now));
        fields.insert("updatedAt".into(), json!(now));

        let record = Value::Object(fields);
        self.collections.entry(collection).or_default().push(record.clone());
        Ok(record)
    }

    /// Merge `fields` over an existing record. Identifiers and creation time
    /// are never overwritten; required fields may not be blanked.
    pub fn update(&mut self, collection: Collection, id: &str, fields: Map<String, Value>, now: DateTime<Utc>) -> Result<Value> {
        Self::check_enums(collection, &fields)?;
        for field in collection.required_fields() {
            if fields.contains_key(*field) && is_blank(fields.get(*field)) {
                return Err(StoreError::BadRequest(format!("{} is required", field)));
            }
        }

        let record = self.record_mut(collection, id)?;
        for (key, value) in fields {
            if matches!(key.as_str(), "_id" | "id" | "createdAt") {
                continue;
            }
            record.insert(key, value);
        }
        record.insert("updatedAt".into(), json!(now));
        Ok(Value::Object(record.clone()))
    }

    pub fn remove(&mut self, collection: Collection, id: &str) -> Result<Value> {
        let records = self.collections.entry(collection).or_default();
        let index = records
            .iter()
            .position(|r| has_id(r, id))
            .ok_or_else(|| StoreError::NotFound(collection.label().to_string()))?;
        Ok(records.remove(index))
    }

    pub fn set_featured(&mut self, id: &str, featured: bool, now: DateTime<Utc>) -> Result<Value> {
        let mut fields = Map::new();
        fields.insert("isFeatured".into(), json!(featured));
        self.update(Collection::Blogs, id, fields, now)
    }

    pub fn mark_sent(&mut self, id: &str, now: DateTime<Utc>) -> Result<Value> {
        let current = self.get(Collection::Newsletters, id)?;
        if current.get("status").and_then(Value::as_str) == Some("sent") {
            return Err(StoreError::BadRequest("newsletter has already been sent".into()));
        }
        let mut fields = Map::new();
        fields.insert("status".into(), json!("sent"));
        fields.insert("lastSent".into(), json!(now.format("%Y-%m-%d").to_string()));
        self.update(Collection::Newsletters, id, fields, now)
    }

    pub fn respond(&mut self, id: &str, response: &str, now: DateTime<Utc>) -> Result<Value> {
        if response.trim().is_empty() {
            return Err(StoreError::BadRequest("response is required".into()));
        }
        let mut fields = Map::new();
        fields.insert("responded".into(), json!(true));
        fields.insert("response".into(), json!(response.trim()));
        fields.insert("respondedAt".into(), json!(now));
        self.update(Collection::Contacts, id, fields, now)
    }
}

pub struct Store {
    data: RwLock<StoreData>,
    path: PathBuf,
}

impl Store {
    /// Open the snapshot at `path`, starting empty when it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no store at {}, starting empty", path.display());
                StoreData::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { data: RwLock::new(data), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read<T>(&self, f: impl FnOnce(&StoreData) -> T) -> T {
        let data = self.data.read().await;
        f(&data)
    }

    /// Apply a change to a copy, persist it, then publish it. A failed
    /// change or a failed write leaves the live data untouched.
    pub async fn mutate<T>(&self, f: impl FnOnce(&mut StoreData) -> Result<T>) -> Result<T> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let out = f(&mut next)?;
        self.persist(&next).await?;
        *data = next;
        Ok(out)
    }

    async fn persist(&self, data: &StoreData) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(data)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn image_path(&self, id: &str) -> PathBuf {
        let dir = self.path.parent().map(Path::to_path_buf).unwrap_or_default();
        // Ids come from the URL; keep them to a single path component
        let safe: String = id.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-').collect();
        dir.join("images").join(safe)
    }

    pub async fn save_image(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.image_path(id);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    pub async fn load_image(&self, id: &str) -> Result<Vec<u8>> {
        match tokio::fs::read(self.image_path(id)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound("image".into())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn remove_image(&self, id: &str) {
        if let Err(e) = tokio::fs::remove_file(self.image_path(id)).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("could not remove image for blog {}: {}", id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn task(title: &str) -> Map<String, Value> {
        fields(json!({ "title": title, "project": "Site", "assignee": "Ann" }))
    }

    #[test]
    fn insert_assigns_identity_and_defaults() {
        let mut data = StoreData::default();
        let now = Utc::now();
        let record = data.insert(Collection::Tasks, task("Wireframes"), now).unwrap();

        assert!(record["_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(record["status"], "todo");
        assert_eq!(record["priority"], "medium");
        assert_eq!(data.list(Collection::Tasks).len(), 1);
    }

    #[test]
    fn insert_rejects_blank_required_fields_and_unknown_status() {
        let mut data = StoreData::default();
        let now = Utc::now();
        let err = data.insert(Collection::Tasks, fields(json!({ "title": " ", "project": "p", "assignee": "a" })), now);
        assert!(matches!(err, Err(StoreError::BadRequest(_))));

        let mut bad = task("x");
        bad.insert("status".into(), json!("done"));
        assert!(matches!(data.insert(Collection::Tasks, bad, now), Err(StoreError::BadRequest(_))));
        assert!(data.list(Collection::Tasks).is_empty());
    }

    #[test]
    fn update_merges_and_keeps_identity() {
        let mut data = StoreData::default();
        let now = Utc::now();
        let created = data.insert(Collection::Tasks, task("Wireframes"), now).unwrap();
        let id = created["_id"].as_str().unwrap().to_string();

        let updated = data
            .update(Collection::Tasks, &id, fields(json!({ "status": "in-progress", "_id": "other" })), now)
            .unwrap();
        assert_eq!(updated["status"], "in-progress");
        assert_eq!(updated["title"], "Wireframes");
        assert_eq!(updated["_id"], id.as_str());

        let blanked = data.update(Collection::Tasks, &id, fields(json!({ "title": "" })), now);
        assert!(matches!(blanked, Err(StoreError::BadRequest(_))));
    }

    #[test]
    fn numeric_ids_are_addressable() {
        let mut data = StoreData::default();
        data.collections
            .insert(Collection::Projects, vec![json!({ "id": 7, "name": "CRM", "client": "Acme" })]);
        assert_eq!(data.get(Collection::Projects, "7").unwrap()["name"], "CRM");
        assert!(matches!(data.get(Collection::Projects, "8"), Err(StoreError::NotFound(_))));
        assert!(data.remove(Collection::Projects, "7").is_ok());
        assert!(data.list(Collection::Projects).is_empty());
    }

    #[test]
    fn actions_update_their_records() {
        let mut data = StoreData::default();
        let now = Utc::now();
        let blog = data
            .insert(Collection::Blogs, fields(json!({ "title": "Hello", "content": "World" })), now)
            .unwrap();
        let blog_id = blog["_id"].as_str().unwrap().to_string();
        assert_eq!(data.set_featured(&blog_id, true, now).unwrap()["isFeatured"], true);

        let letter = data.insert(Collection::Newsletters, fields(json!({ "title": "May" })), now).unwrap();
        let letter_id = letter["_id"].as_str().unwrap().to_string();
        assert_eq!(data.mark_sent(&letter_id, now).unwrap()["status"], "sent");
        assert!(data.mark_sent(&letter_id, now).is_err());

        let contact = data
            .insert(Collection::Contacts, fields(json!({ "name": "Bo", "email": "bo@x.io", "message": "Hi" })), now)
            .unwrap();
        let contact_id = contact["_id"].as_str().unwrap().to_string();
        assert!(data.respond(&contact_id, "  ", now).is_err());
        let answered = data.respond(&contact_id, "Thanks!", now).unwrap();
        assert_eq!(answered["responded"], true);
        assert_eq!(answered["response"], "Thanks!");
    }

    #[test]
    fn envelope_keys() {
        assert_eq!(Collection::from_path("team"), Some(Collection::Team));
        assert_eq!(Collection::Team.list_key(), "admins");
        assert_eq!(Collection::Team.item_key(), "admin");
        assert_eq!(Collection::Newsletters.list_key(), "newsletters");
        assert_eq!(Collection::from_path("auth"), None);
    }

    #[tokio::test]
    async fn mutations_survive_a_reopen() {
        let dir = std::env::temp_dir().join(format!("agency-admin-test-{}", Uuid::new_v4()));
        let path = dir.join("store.json");

        let store = Store::open(&path).await.unwrap();
        let created = store
            .mutate(|data| data.insert(Collection::Tasks, task("Persist me"), Utc::now()))
            .await
            .unwrap();
        store.save_image("abc-1", b"png").await.unwrap();

        let reopened = Store::open(&path).await.unwrap();
        let tasks = reopened.read(|data| data.list(Collection::Tasks)).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["_id"], created["_id"]);
        assert_eq!(reopened.load_image("abc-1").await.unwrap(), b"png");
        assert!(matches!(reopened.load_image("missing").await, Err(StoreError::NotFound(_))));

        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_unchanged() {
        let dir = std::env::temp_dir().join(format!("agency-admin-test-{}", Uuid::new_v4()));
        let path = dir.join("store.json");
        let store = Store::open(&path).await.unwrap();

        // A directory where the temp snapshot goes makes the write fail
        tokio::fs::create_dir_all(path.with_extension("json.tmp")).await.unwrap();

        let result = store
            .mutate(|data| data.insert(Collection::Tasks, task("Lost"), Utc::now()))
            .await;
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(store.read(|data| data.list(Collection::Tasks)).await.is_empty());

        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn rejected_change_is_not_applied() {
        let dir = std::env::temp_dir().join(format!("agency-admin-test-{}", Uuid::new_v4()));
        let store = Store::open(dir.join("store.json")).await.unwrap();
        let created = store
            .mutate(|data| data.insert(Collection::Tasks, task("Keep"), Utc::now()))
            .await
            .unwrap();
        let id = created["_id"].as_str().unwrap().to_string();

        // First edit succeeds on the copy, the second fails: neither lands
        let result = store
            .mutate(|data| {
                data.update(Collection::Tasks, &id, fields(json!({ "title": "Changed" })), Utc::now())?;
                data.update(Collection::Tasks, &id, fields(json!({ "status": "done" })), Utc::now())
            })
            .await;
        assert!(result.is_err());
        let task = store.read(|data| data.get(Collection::Tasks, &id)).await.unwrap();
        assert_eq!(task["title"], "Keep");

        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}
