use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::FormError;
use crate::core::services::{auth, storage};
use crate::features::auth::use_session;

// Where to land after signing in: the last dashboard screen, never /login itself
pub fn landing_path(last: Option<String>) -> String {
    match last {
        Some(path) if path.starts_with('/') && !path.starts_with("/login") => path,
        _ => "/".to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let navigate = navigate.clone();
        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            match auth::login(&email.get_untracked(), &password.get_untracked()).await {
                Ok(response) => {
                    session.sign_in(&response.token, response.user);
                    navigate(&landing_path(storage::last_path()), Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Login failed: {}", e).into());
                    let message = if e.is_unauthorized() { "Invalid email or password".to_string() } else { e.to_string() };
                    error.set(Some(message));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="login-screen">
            <form class="login-card" on:submit=handle_submit>
                <h1>"Agency Admin"</h1>
                <p class="muted">"Sign in to manage your agency"</p>
                <FormError error=error/>
                <div class="form-group">
                    <label>"EMAIL"</label>
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        required
                    />
                </div>
                <div class="form-group">
                    <label>"PASSWORD"</label>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        required
                    />
                </div>
                <button type="submit" class="btn-primary btn-block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "SIGNING IN..." } else { "SIGN IN" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_to_the_last_screen() {
        assert_eq!(landing_path(Some("/tasks".into())), "/tasks");
        assert_eq!(landing_path(Some("/login".into())), "/");
        assert_eq!(landing_path(Some("https://evil.test".into())), "/");
        assert_eq!(landing_path(None), "/");
    }
}
