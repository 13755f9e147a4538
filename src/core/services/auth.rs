use serde_json::json;

use super::http::{fetch_json, RequestBody};
use crate::core::error::ApiError;
use crate::core::models::user::{LoginResponse, VerifyResponse};
use crate::core::models::User;

// The bearer header is taken from storage, so the token must already be stored
pub async fn verify_token() -> Result<User, ApiError> {
    let response: VerifyResponse = fetch_json("GET", "/auth/verify", RequestBody::Empty).await?;
    Ok(response.user)
}

pub async fn login(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }
    fetch_json(
        "POST",
        "/auth/login",
        RequestBody::Json(json!({ "email": email.trim(), "password": password })),
    )
    .await
}
