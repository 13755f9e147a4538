use serde_json::Value;
use web_sys::File;

use crate::core::error::ApiError;
use crate::core::filter::ListQuery;
use crate::core::models::{RecordId, Resource};
use crate::core::services::{api, http};

/// Put a record returned by the store into the local list. A record whose
/// identifier is already present is merged over the existing one field by
/// field; anything else is appended. Returns true when it was an update.
pub fn merge_saved<R: Resource>(items: &mut Vec<R>, saved: R) -> bool {
    let Some(id) = saved.record_id() else {
        items.push(saved);
        return false;
    };

    match items.iter().position(|r| r.record_id().as_ref() == Some(&id)) {
        Some(index) => {
            items[index] = overlay(&items[index], saved);
            true
        }
        None => {
            items.push(saved);
            false
        }
    }
}

fn overlay<R: Resource>(base: &R, update: R) -> R {
    let (Ok(Value::Object(mut merged)), Ok(Value::Object(fields))) =
        (serde_json::to_value(base), serde_json::to_value(&update))
    else {
        return update;
    };
    for (key, value) in fields {
        if !value.is_null() {
            merged.insert(key, value);
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or(update)
}

pub fn drop_record<R: Resource>(items: &mut Vec<R>, id: &RecordId) -> Option<R> {
    let index = items.iter().position(|r| r.record_id().as_ref() == Some(id))?;
    Some(items.remove(index))
}

// Placeholder under an empty list
pub fn empty_message(noun: &str, query: &ListQuery) -> String {
    if query.is_unfiltered() {
        format!("No {} yet.", noun)
    } else {
        format!("No {} found matching your criteria.", noun)
    }
}

pub async fn save_json<R: Resource>(id: Option<RecordId>, payload: Value) -> Result<R, ApiError> {
    match id {
        Some(id) => api::update_json::<R>(&id, payload).await,
        None => api::create_json::<R>(payload).await,
    }
}

// Multipart create/update; `image` is attached only when the user picked a file
pub async fn save_form<R: Resource>(
    id: Option<RecordId>,
    fields: Vec<(&'static str, String)>,
    image: Option<File>,
) -> Result<R, ApiError> {
    let form = http::form_data(&fields)?;
    if let Some(file) = image {
        form.append_with_blob_and_filename("image", &file, &file.name())?;
    }
    match id {
        Some(id) => api::update_form::<R>(&id, form).await,
        None => api::create_form::<R>(form).await,
    }
}
