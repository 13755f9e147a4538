//! Request bodies for create/update: JSON objects or multipart forms.
//!
//! Multipart values arrive as strings, so known fields are coerced back to
//! the types the JSON clients send.

use axum::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::error::StoreError;

const BOOL_FIELDS: &[&str] = &["isFeatured", "responded"];
const NUMBER_FIELDS: &[&str] = &["attendees", "subscribers", "progress", "team", "projects", "tasks"];
const LIST_FIELDS: &[&str] = &["tags", "skills"];

#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct Payload {
    pub fields: Map<String, Value>,
    pub image: Option<Upload>,
}

pub fn coerce_field(name: &str, raw: String) -> Value {
    if BOOL_FIELDS.contains(&name) {
        return json!(matches!(raw.trim(), "true" | "on" | "1"));
    }
    if NUMBER_FIELDS.contains(&name) {
        return match raw.trim().parse::<i64>() {
            Ok(n) => json!(n),
            Err(_) => json!(0),
        };
    }
    if LIST_FIELDS.contains(&name) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&raw) {
            return Value::Array(items);
        }
        let items: Vec<Value> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| json!(s))
            .collect();
        return Value::Array(items);
    }
    Value::String(raw)
}

fn bad_request(e: impl std::fmt::Display) -> StoreError {
    StoreError::BadRequest(e.to_string())
}

async fn read_multipart(mut multipart: Multipart) -> Result<Payload, StoreError> {
    let mut payload = Payload::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
            let bytes = field.bytes().await.map_err(bad_request)?;
            // Browsers send an empty part when no file was picked
            if !bytes.is_empty() {
                payload.image = Some(Upload { file_name, content_type, bytes: bytes.to_vec() });
            }
            continue;
        }
        let text = field.text().await.map_err(bad_request)?;
        payload.fields.insert(name.clone(), coerce_field(&name, text));
    }
    Ok(payload)
}

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = StoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(bad_request)?;
            return read_multipart(multipart).await;
        }
        let Json(fields) = Json::<Map<String, Value>>::from_request(req, state)
            .await
            .map_err(bad_request)?;
        Ok(Payload { fields, image: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_strings_become_typed_values() {
        assert_eq!(coerce_field("isFeatured", "true".into()), json!(true));
        assert_eq!(coerce_field("isFeatured", "false".into()), json!(false));
        assert_eq!(coerce_field("attendees", " 42 ".into()), json!(42));
        assert_eq!(coerce_field("subscribers", "many".into()), json!(0));
        assert_eq!(coerce_field("title", "42".into()), json!("42"));
    }

    #[test]
    fn tag_lists_accept_json_or_commas() {
        assert_eq!(coerce_field("tags", r#"["rust","web"]"#.into()), json!(["rust", "web"]));
        assert_eq!(coerce_field("tags", "rust, web,,".into()), json!(["rust", "web"]));
        assert_eq!(coerce_field("skills", String::new()), json!([]));
    }
}
