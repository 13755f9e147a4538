//! Single admin account with in-memory bearer sessions.

use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::web::AppState;

#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Tokens are lost on restart; clients then get a 401 and sign in again.
#[derive(Default)]
pub struct Sessions {
    tokens: RwLock<HashMap<String, AdminUser>>,
}

impl Sessions {
    pub async fn login(&self, account: &AdminAccount, credentials: &Credentials) -> Result<(String, AdminUser), StoreError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(StoreError::BadRequest("email and password are required".into()));
        }
        if !credentials.email.trim().eq_ignore_ascii_case(&account.email) || credentials.password != account.password {
            log::warn!("failed sign-in for {}", credentials.email.trim());
            return Err(StoreError::InvalidCredentials);
        }

        let user = AdminUser {
            id: "admin".into(),
            email: account.email.clone(),
            role: "superadmin".into(),
        };
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.write().await.insert(token.clone(), user.clone());
        log::info!("{} signed in", user.email);
        Ok((token, user))
    }

    pub async fn verify(&self, token: &str) -> Option<AdminUser> {
        self.tokens.read().await.get(token).cloned()
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extractor for routes that need a signed-in admin.
pub struct Admin(pub AdminUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for Admin {
    type Rejection = StoreError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(StoreError::Unauthorized)?;
        state.sessions.verify(token).await.map(Admin).ok_or(StoreError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn account() -> AdminAccount {
        AdminAccount { email: "admin@agency.local".into(), password: "secret".into() }
    }

    #[tokio::test]
    async fn login_issues_a_verifiable_token() {
        let sessions = Sessions::default();
        let credentials = Credentials { email: " Admin@Agency.local".into(), password: "secret".into() };
        let (token, user) = sessions.login(&account(), &credentials).await.unwrap();

        assert_eq!(user.email, "admin@agency.local");
        assert_eq!(sessions.verify(&token).await, Some(user));
        assert_eq!(sessions.verify("nope").await, None);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let sessions = Sessions::default();
        let credentials = Credentials { email: "admin@agency.local".into(), password: "guess".into() };
        assert!(matches!(
            sessions.login(&account(), &credentials).await,
            Err(StoreError::InvalidCredentials)
        ));
        let empty = Credentials { email: String::new(), password: String::new() };
        assert!(matches!(sessions.login(&account(), &empty).await, Err(StoreError::BadRequest(_))));
    }

    #[test]
    fn bearer_header_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);
    }
}
