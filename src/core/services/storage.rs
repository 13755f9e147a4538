use web_sys::Storage;

use crate::core::config::{LAST_PATH_KEY, TOKEN_KEY, USER_KEY};
use crate::core::models::User;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?.filter(|v| !v.is_empty())
}

fn write(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            web_sys::console::error_1(&format!("Failed to write {} to local storage", key).into());
        }
    }
}

fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn auth_token() -> Option<String> {
    read(TOKEN_KEY)
}

pub fn cached_user() -> Option<User> {
    read(USER_KEY).and_then(|raw| serde_json::from_str(&raw).ok())
}

pub fn store_session(token: &str, user: &User) {
    write(TOKEN_KEY, token);
    match serde_json::to_string(user) {
        Ok(raw) => write(USER_KEY, &raw),
        Err(e) => web_sys::console::error_1(&format!("Failed to serialize user: {}", e).into()),
    }
}

pub fn clear_session() {
    remove(TOKEN_KEY);
    remove(USER_KEY);
}

pub fn last_path() -> Option<String> {
    read(LAST_PATH_KEY)
}

pub fn remember_last_path(path: &str) {
    write(LAST_PATH_KEY, path);
}

pub fn forget_last_path() {
    remove(LAST_PATH_KEY);
}
