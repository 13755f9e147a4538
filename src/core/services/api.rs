use serde_json::Value;
use web_sys::FormData;

use super::http::{fetch_value, execute_request, RequestBody};
use crate::core::error::ApiError;
use crate::core::models::record::{action_path, member_path};
use crate::core::models::{RecordId, Resource};

// Lists arrive as { "<list key>": [...] }; malformed or invalid records are
// skipped and counted
pub fn decode_list<R: Resource>(body: Value) -> Result<(Vec<R>, usize), ApiError> {
    let items = match body {
        Value::Object(mut map) => map.remove(R::LIST_KEY).unwrap_or(Value::Array(Vec::new())),
        Value::Array(items) => Value::Array(items),
        Value::Null => Value::Array(Vec::new()),
        other => return Err(ApiError::Decode(format!("expected a {} list, got {}", R::LIST_KEY, other))),
    };

    let Value::Array(items) = items else {
        return Err(ApiError::Decode(format!("'{}' is not a list", R::LIST_KEY)));
    };

    let total = items.len();
    let records: Vec<R> = items
        .into_iter()
        .filter_map(|v| serde_json::from_value::<R>(v).ok())
        .filter(|r| r.is_valid())
        .collect();

    let skipped = total - records.len();
    Ok((records, skipped))
}

// Single records arrive as { "<item key>": {...} } or bare
pub fn decode_item<R: Resource>(body: Value) -> Result<R, ApiError> {
    let value = match body {
        Value::Object(mut map) if map.contains_key(R::ITEM_KEY) => map.remove(R::ITEM_KEY).unwrap_or_default(),
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

pub async fn list<R: Resource>() -> Result<Vec<R>, ApiError> {
    let (records, skipped) = decode_list(fetch_value("GET", R::PATH, RequestBody::Empty).await?)?;
    if skipped > 0 {
        web_sys::console::log_1(&format!("Skipped {} invalid {} records", skipped, R::LIST_KEY).into());
    }
    Ok(records)
}

pub async fn fetch_one<R: Resource>(id: &RecordId) -> Result<R, ApiError> {
    decode_item(fetch_value("GET", &member_path::<R>(id), RequestBody::Empty).await?)
}

pub async fn create_json<R: Resource>(payload: Value) -> Result<R, ApiError> {
    decode_item(fetch_value("POST", R::PATH, RequestBody::Json(payload)).await?)
}

pub async fn update_json<R: Resource>(id: &RecordId, payload: Value) -> Result<R, ApiError> {
    decode_item(fetch_value("PUT", &member_path::<R>(id), RequestBody::Json(payload)).await?)
}

pub async fn create_form<R: Resource>(form: FormData) -> Result<R, ApiError> {
    decode_item(fetch_value("POST", R::PATH, RequestBody::Form(form)).await?)
}

pub async fn update_form<R: Resource>(id: &RecordId, form: FormData) -> Result<R, ApiError> {
    decode_item(fetch_value("PUT", &member_path::<R>(id), RequestBody::Form(form)).await?)
}

pub async fn remove<R: Resource>(id: &RecordId) -> Result<(), ApiError> {
    execute_request("DELETE", &member_path::<R>(id), RequestBody::Empty).await?;
    Ok(())
}

// Server-side state transitions: /feature, /send, /respond
pub async fn action<R: Resource>(id: &RecordId, action: &str, method: &str, payload: Option<Value>) -> Result<Value, ApiError> {
    let body = payload.map(RequestBody::Json).unwrap_or(RequestBody::Empty);
    fetch_value(method, &action_path::<R>(id, action), body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Developer, Task, TaskStatus};
    use serde_json::json;

    #[test]
    fn list_skips_records_missing_required_fields() {
        let body = json!({ "tasks": [
            { "_id": "1", "title": "Ok", "project": "P", "assignee": "A", "status": "todo" },
            { "_id": "2", "title": "", "project": "P", "assignee": "A", "status": "todo" },
            { "_id": "3", "project": "P", "assignee": "A", "status": "todo" },
            { "_id": "4", "title": "Bad status", "project": "P", "assignee": "A", "status": "done" }
        ]});
        let (tasks, skipped): (Vec<Task>, usize) = decode_list(body).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(skipped, 3);
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn list_uses_the_resource_envelope() {
        let body = json!({ "admins": [{ "_id": "d", "name": "N", "email": "e@x" }] });
        let (devs, _): (Vec<Developer>, usize) = decode_list(body).unwrap();
        assert_eq!(devs.len(), 1);
        let (empty, skipped): (Vec<Developer>, usize) = decode_list(json!({ "unrelated": [] })).unwrap();
        assert!(empty.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn item_accepts_wrapped_or_bare_records() {
        let wrapped = json!({ "task": { "id": 5, "title": "T", "project": "P", "assignee": "A", "status": "review" }});
        let task: Task = decode_item(wrapped).unwrap();
        assert_eq!(task.status, TaskStatus::Review);

        let bare = json!({ "id": 6, "title": "T", "project": "P", "assignee": "A", "status": "completed" });
        let task: Task = decode_item(bare).unwrap();
        assert_eq!(task.record_id(), Some(RecordId::Number(6)));
    }
}
