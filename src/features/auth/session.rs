use leptos::prelude::*;

use crate::core::error::ApiError;
use crate::core::models::User;
use crate::core::services::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Checking,
    Authenticated,
    Anonymous,
}

// App-wide session, provided once from App and read through use_session()
#[derive(Clone, Copy)]
pub struct Session {
    pub user: RwSignal<Option<User>>,
    pub state: RwSignal<AuthState>,
}

impl Session {
    pub fn provide() -> Self {
        let session = Self {
            user: RwSignal::new(storage::cached_user()),
            state: RwSignal::new(AuthState::Checking),
        };
        provide_context(session);
        session
    }

    pub fn sign_in(&self, token: &str, user: User) {
        storage::store_session(token, &user);
        self.user.set(Some(user));
        self.state.set(AuthState::Authenticated);
    }

    // Token missing or rejected: drop everything cached and let the layout redirect
    pub fn invalidate(&self) {
        storage::clear_session();
        storage::forget_last_path();
        self.user.set(None);
        self.state.set(AuthState::Anonymous);
    }

    pub fn logout(&self) {
        storage::clear_session();
        self.user.set(None);
        self.state.set(AuthState::Anonymous);
    }

    // Shared failure path for every screen: log, then either expire the
    // session or surface the message inline
    pub fn report(&self, context: &str, err: ApiError, inline: RwSignal<Option<String>>) {
        web_sys::console::error_1(&format!("{}: {}", context, err).into());
        if err.is_unauthorized() {
            self.invalidate();
        } else {
            inline.set(Some(format!("{}: {}", context, err)));
        }
    }
}

pub fn use_session() -> Session {
    use_context::<Session>().expect("Session context")
}
