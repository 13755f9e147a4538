use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::auth::{Admin, AdminAccount, Credentials, Sessions};
use crate::config::ServerConfig;
use crate::error::{Result, StoreError};
use crate::forms::{Payload, Upload};
use crate::store::{Collection, Store};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const ANSWER_FIELDS: &[&str] = &["responded", "response", "respondedAt"];

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub sessions: Arc<Sessions>,
    pub account: Arc<AdminAccount>,
}

impl AppState {
    pub fn new(store: Store, account: AdminAccount) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(Sessions::default()),
            account: Arc::new(account),
        }
    }
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify", get(verify))
        .route("/:collection", get(list).post(create))
        .route("/:collection/:id", get(fetch).put(update).delete(remove))
        .route("/:collection/:id/:action", get(image).put(act).post(act));

    let dist = ServeDir::new(&config.dist).not_found_service(ServeFile::new(config.dist.join("index.html")));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/v1", api)
        .fallback_service(dist)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn collection(segment: &str) -> Result<Collection> {
    Collection::from_path(segment).ok_or_else(|| StoreError::NotFound(segment.to_string()))
}

fn item(collection: Collection, record: Value) -> Json<Value> {
    Json(json!({ (collection.item_key()): record }))
}

async fn login(State(state): State<AppState>, Json(credentials): Json<Credentials>) -> Result<Json<Value>> {
    let (token, user) = state.sessions.login(&state.account, &credentials).await?;
    Ok(Json(json!({ "token": token, "user": user })))
}

async fn verify(Admin(user): Admin) -> Json<Value> {
    Json(json!({ "user": user }))
}

async fn list(State(state): State<AppState>, Path(segment): Path<String>, _admin: Admin) -> Result<Json<Value>> {
    let collection = collection(&segment)?;
    let records = state.store.read(|data| data.list(collection)).await;
    Ok(Json(json!({ (collection.list_key()): records })))
}

async fn fetch(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
    _admin: Admin,
) -> Result<Json<Value>> {
    let collection = collection(&segment)?;
    let record = state.store.read(|data| data.get(collection, &id)).await?;
    Ok(item(collection, record))
}

// Blog uploads: the metadata lives on the record, the bytes beside the store
fn attach_image_meta(payload: &mut Payload) {
    if let Some(upload) = &payload.image {
        payload.fields.insert(
            "image".into(),
            json!({ "contentType": upload.content_type, "fileName": upload.file_name }),
        );
    }
}

async fn store_image(state: &AppState, record: &Value, upload: Option<Upload>) -> Result<()> {
    let (Some(upload), Some(id)) = (upload, record.get("_id").and_then(Value::as_str)) else {
        return Ok(());
    };
    state.store.save_image(id, &upload.bytes).await?;
    log::info!("stored {} byte image for blog {}", upload.bytes.len(), id);
    Ok(())
}

/// Contact messages come from the public site; everything else needs a session.
async fn create(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    admin: Option<Admin>,
    mut payload: Payload,
) -> Result<Response> {
    let collection = collection(&segment)?;
    if admin.is_none() {
        if collection != Collection::Contacts {
            return Err(StoreError::Unauthorized);
        }
        // Visitors may only leave a message; replies are set by an admin
        for key in ANSWER_FIELDS {
            payload.fields.remove(*key);
        }
    }

    if collection == Collection::Blogs {
        attach_image_meta(&mut payload);
        if let Some(Admin(user)) = &admin {
            payload.fields.insert("author".into(), json!({ "email": user.email }));
        }
    } else {
        payload.image = None;
    }

    let Payload { fields, image } = payload;
    let record = state.store.mutate(|data| data.insert(collection, fields, Utc::now())).await?;
    store_image(&state, &record, image).await?;
    log::info!("created {} {}", collection.item_key(), record["_id"]);
    Ok((StatusCode::CREATED, item(collection, record)).into_response())
}

async fn update(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
    _admin: Admin,
    mut payload: Payload,
) -> Result<Json<Value>> {
    let collection = collection(&segment)?;
    if collection == Collection::Blogs {
        attach_image_meta(&mut payload);
    } else {
        payload.image = None;
    }

    let Payload { fields, image } = payload;
    let record = state.store.mutate(|data| data.update(collection, &id, fields, Utc::now())).await?;
    store_image(&state, &record, image).await?;
    Ok(item(collection, record))
}

async fn remove(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
    _admin: Admin,
) -> Result<Json<Value>> {
    let collection = collection(&segment)?;
    state.store.mutate(|data| data.remove(collection, &id)).await?;
    if collection == Collection::Blogs {
        state.store.remove_image(&id).await;
    }
    log::info!("deleted {} {}", collection.item_key(), id);
    Ok(Json(json!({ "message": format!("{} deleted", collection.item_key()) })))
}

// Public so <img> tags can load it without a bearer header
async fn image(State(state): State<AppState>, Path((segment, id, action)): Path<(String, String, String)>) -> Result<Response> {
    if collection(&segment)? != Collection::Blogs || action != "image" {
        return Err(StoreError::NotFound(format!("{}/{}", segment, action)));
    }
    let record = state.store.read(|data| data.get(Collection::Blogs, &id)).await?;
    let content_type = record
        .pointer("/image/contentType")
        .and_then(Value::as_str)
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = state.store.load_image(&id).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

async fn act(
    State(state): State<AppState>,
    method: Method,
    Path((segment, id, action)): Path<(String, String, String)>,
    _admin: Admin,
    body: Option<Json<Value>>,
) -> Result<Json<Value>> {
    let collection = collection(&segment)?;
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let now = Utc::now();

    let record = match (collection, action.as_str(), method) {
        (Collection::Blogs, "feature", Method::PUT) => {
            let requested = body.get("isFeatured").and_then(Value::as_bool);
            state
                .store
                .mutate(|data| {
                    let featured = match requested {
                        Some(flag) => flag,
                        None => !data.get(Collection::Blogs, &id)?["isFeatured"].as_bool().unwrap_or(false),
                    };
                    data.set_featured(&id, featured, now)
                })
                .await?
        }
        (Collection::Newsletters, "send", Method::POST) => {
            let record = state.store.mutate(|data| data.mark_sent(&id, now)).await?;
            log::info!("newsletter {} marked as sent", id);
            record
        }
        (Collection::Contacts, "respond", Method::POST) => {
            let response = body.get("response").and_then(Value::as_str).unwrap_or_default().to_string();
            state.store.mutate(|data| data.respond(&id, &response, now)).await?
        }
        _ => return Err(StoreError::NotFound(format!("{}/{}", segment, action))),
    };
    Ok(item(collection, record))
}

pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let addr = config
        .addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let store = Store::open(config.data_file())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    log::info!("store: {}", store.path().display());

    let account = AdminAccount {
        email: config.admin_email.clone(),
        password: config.admin_password.clone(),
    };
    let router = build_router(AppState::new(store, account), &config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", addr);
    if config.is_public() {
        match local_ip_address::local_ip() {
            Ok(ip) => log::info!("on your network: http://{}:{}", ip, config.port),
            Err(e) => log::warn!("could not determine LAN address: {}", e),
        }
    }
    axum::serve(listener, router).await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::Request;
    use clap::Parser;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    struct TestApp {
        router: Router,
        token: String,
        dir: PathBuf,
    }

    impl TestApp {
        async fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("agency-admin-web-{}", Uuid::new_v4()));
            let store = Store::open(dir.join("store.json")).await.unwrap();
            let account = AdminAccount { email: "admin@agency.local".into(), password: "secret".into() };
            let state = AppState::new(store, account.clone());
            let credentials = Credentials { email: account.email.clone(), password: account.password.clone() };
            let (token, _) = state.sessions.login(&account, &credentials).await.unwrap();
            let dist = dir.join("dist");
            let config = ServerConfig::parse_from(["agency-admin-server", "--dist", dist.to_str().unwrap()]);
            Self { router: build_router(state, &config), token, dir }
        }

        async fn call(&self, method: &str, uri: &str, signed_in: bool, body: Option<Value>) -> (StatusCode, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            if signed_in {
                request = request.header(header::AUTHORIZATION, format!("Bearer {}", self.token));
            }
            let request = match body {
                Some(json) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string())),
                None => request.body(Body::empty()),
            }
            .unwrap();

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }

        async fn create(&self, path: &str, body: Value, key: &str) -> String {
            let (status, created) = self.call("POST", path, true, Some(body)).await;
            assert_eq!(status, StatusCode::CREATED);
            created[key]["_id"].as_str().unwrap().to_string()
        }

        async fn cleanup(self) {
            let _ = tokio::fs::remove_dir_all(self.dir).await;
        }
    }

    #[tokio::test]
    async fn login_then_verify_returns_the_admin() {
        let app = TestApp::new().await;
        let (status, body) = app
            .call("POST", "/api/v1/auth/login", false, Some(json!({ "email": "admin@agency.local", "password": "secret" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let (status, body) = app.call("GET", "/api/v1/auth/verify", true, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "admin@agency.local");

        let (status, _) = app.call("GET", "/api/v1/auth/verify", false, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        app.cleanup().await;
    }

    #[tokio::test]
    async fn collection_routes_need_a_bearer_token() {
        let app = TestApp::new().await;
        let (status, body) = app.call("GET", "/api/v1/tasks", false, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());

        let (status, _) = app
            .call("POST", "/api/v1/projects", false, Some(json!({ "name": "Site", "client": "Acme" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app.call("GET", "/api/v1/tasks", true, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "tasks": [] }));

        let (status, body) = app.call("GET", "/api/v1/team", true, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "admins": [] }));
        app.cleanup().await;
    }

    #[tokio::test]
    async fn visitors_can_post_contacts_but_not_replies() {
        let app = TestApp::new().await;
        let message = json!({
            "name": "Kim", "email": "kim@x.io", "message": "Quote?",
            "responded": true, "response": "self-answered", "respondedAt": "2024-01-01T00:00:00Z"
        });
        let (status, body) = app.call("POST", "/api/v1/contacts", false, Some(message)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["contact"]["responded"], false);
        assert!(body["contact"].get("response").is_none());
        assert!(body["contact"].get("respondedAt").is_none());

        let (status, _) = app.call("GET", "/api/v1/contacts", false, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        app.cleanup().await;
    }

    #[tokio::test]
    async fn status_only_put_returns_the_task_envelope() {
        let app = TestApp::new().await;
        let id = app
            .create("/api/v1/tasks", json!({ "title": "Wireframes", "project": "Site", "assignee": "Ann" }), "task")
            .await;

        let uri = format!("/api/v1/tasks/{}", id);
        let (status, body) = app.call("PUT", &uri, true, Some(json!({ "status": "in-progress" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"]["status"], "in-progress");
        assert_eq!(body["task"]["title"], "Wireframes");
        assert_eq!(body["task"]["_id"], id.as_str());

        let (status, _) = app.call("PUT", &uri, true, Some(json!({ "status": "done" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app.call("DELETE", &uri, true, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());
        let (status, _) = app.call("GET", &uri, true, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        app.cleanup().await;
    }

    #[tokio::test]
    async fn unknown_collection_is_not_found() {
        let app = TestApp::new().await;
        let (status, body) = app.call("GET", "/api/v1/widgets", true, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());

        let (status, _) = app.call("GET", "/health", false, None).await;
        assert_eq!(status, StatusCode::OK);
        app.cleanup().await;
    }

    #[tokio::test]
    async fn actions_are_dispatched_by_method() {
        let app = TestApp::new().await;

        let blog = app.create("/api/v1/blogs", json!({ "title": "Hello", "content": "World" }), "blog").await;
        let feature = format!("/api/v1/blogs/{}/feature", blog);
        let (status, body) = app.call("PUT", &feature, true, Some(json!({ "isFeatured": true }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blog"]["isFeatured"], true);
        assert_eq!(body["blog"]["author"]["email"], "admin@agency.local");
        let (status, _) = app.call("POST", &feature, true, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let letter = app.create("/api/v1/newsletters", json!({ "title": "May" }), "newsletter").await;
        let send = format!("/api/v1/newsletters/{}/send", letter);
        let (status, _) = app.call("PUT", &send, true, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = app.call("POST", &send, true, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["newsletter"]["status"], "sent");

        let contact = app
            .create("/api/v1/contacts", json!({ "name": "Bo", "email": "bo@x.io", "message": "Hi" }), "contact")
            .await;
        let respond = format!("/api/v1/contacts/{}/respond", contact);
        let (status, _) = app.call("POST", &respond, false, Some(json!({ "response": "Thanks" }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, body) = app.call("POST", &respond, true, Some(json!({ "response": "Thanks" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contact"]["responded"], true);
        assert_eq!(body["contact"]["response"], "Thanks");
        app.cleanup().await;
    }
}
