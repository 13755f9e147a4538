use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Backend records carry either a document id (`_id`) or a numeric `id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordKey {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl RecordKey {
    pub fn record_id(&self) -> Option<RecordId> {
        match (&self.object_id, self.id) {
            (Some(oid), _) if !oid.is_empty() => Some(RecordId::Text(oid.clone())),
            (_, Some(n)) => Some(RecordId::Number(n)),
            _ => None,
        }
    }
}

/// A record type exposed by the REST store under its own path.
///
/// List responses wrap the records in `{ LIST_KEY: [...] }` and single-record
/// responses in `{ ITEM_KEY: {...} }`.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const PATH: &'static str;
    const LIST_KEY: &'static str;
    const ITEM_KEY: &'static str;

    fn key(&self) -> &RecordKey;

    fn record_id(&self) -> Option<RecordId> {
        self.key().record_id()
    }

    // Records failing this check are dropped when a list is loaded
    fn is_valid(&self) -> bool {
        true
    }
}

pub fn member_path<R: Resource>(id: &RecordId) -> String {
    format!("{}/{}", R::PATH, id)
}

pub fn action_path<R: Resource>(id: &RecordId, action: &str) -> String {
    format!("{}/{}/{}", R::PATH, id, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_wins_over_numeric_id() {
        let key = RecordKey { object_id: Some("abc".into()), id: Some(4) };
        assert_eq!(key.record_id(), Some(RecordId::Text("abc".into())));

        let key = RecordKey { object_id: None, id: Some(4) };
        assert_eq!(key.record_id(), Some(RecordId::Number(4)));
        assert_eq!(key.record_id().map(|id| id.to_string()), Some("4".to_string()));

        assert_eq!(RecordKey::default().record_id(), None);
    }

    #[test]
    fn key_reads_either_wire_field() {
        let key: RecordKey = serde_json::from_str(r#"{"_id":"65f0"}"#).unwrap();
        assert_eq!(key.record_id(), Some(RecordId::Text("65f0".into())));
        let key: RecordKey = serde_json::from_str(r#"{"id":12}"#).unwrap();
        assert_eq!(key.record_id(), Some(RecordId::Number(12)));
    }
}
