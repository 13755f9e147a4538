use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

use super::storage::auth_token;
use crate::core::config::endpoint;
use crate::core::error::ApiError;

pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    // Multipart: the browser sets the boundary header itself
    Form(FormData),
}

// Generic REST executor: attaches the bearer token, maps non-2xx to ApiError
pub async fn execute_request(method: &str, path: &str, body: RequestBody) -> Result<Response, ApiError> {
    let url = endpoint(path);

    let init = RequestInit::new();
    init.set_method(method);
    init.set_mode(RequestMode::Cors);

    let request = match body {
        RequestBody::Empty => Request::new_with_str_and_init(&url, &init)?,
        RequestBody::Json(value) => {
            let text = serde_json::to_string(&value)?;
            init.set_body(&JsValue::from_str(&text));
            let request = Request::new_with_str_and_init(&url, &init)?;
            request.headers().set("Content-Type", "application/json")?;
            request
        }
        RequestBody::Form(form) => {
            init.set_body(form.as_ref());
            Request::new_with_str_and_init(&url, &init)?
        }
    };

    if let Some(token) = auth_token() {
        request.headers().set("Authorization", &format!("Bearer {}", token))?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window available".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    if !response.ok() {
        web_sys::console::error_1(&format!("{} {} failed with status {}", method, url, response.status()).into());
        return Err(ApiError::from_status(response.status()));
    }

    Ok(response)
}

pub async fn response_text(response: Response) -> Result<String, ApiError> {
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

pub async fn fetch_json<T: DeserializeOwned>(method: &str, path: &str, body: RequestBody) -> Result<T, ApiError> {
    let response = execute_request(method, path, body).await?;
    let text = response_text(response).await?;
    Ok(serde_json::from_str(&text)?)
}

pub async fn fetch_value(method: &str, path: &str, body: RequestBody) -> Result<serde_json::Value, ApiError> {
    let response = execute_request(method, path, body).await?;
    let text = response_text(response).await?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

pub fn form_data(fields: &[(&str, String)]) -> Result<FormData, ApiError> {
    let form = FormData::new()?;
    for (name, value) in fields {
        form.append_with_str(name, value)?;
    }
    Ok(form)
}
