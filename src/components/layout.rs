use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Outlet, A};
use leptos_router::hooks::{use_location, use_navigate};

use crate::core::services::{auth, storage};
use crate::features::auth::{guard_step, use_session, AuthState, GuardStep};

pub const NAV_ITEMS: [(&str, &str); 8] = [
    ("/", "Dashboard"),
    ("/team", "Developers"),
    ("/projects", "Projects"),
    ("/tasks", "Tasks"),
    ("/blog", "Blog Posts"),
    ("/events", "Events"),
    ("/newsletters", "Newsletters"),
    ("/contacts", "Contact Queries"),
];

// Header title for a route; nested paths take their section's title
pub fn page_title(path: &str) -> &'static str {
    let section = path.trim_end_matches('/');
    NAV_ITEMS
        .iter()
        .filter(|(href, _)| *href != "/")
        .find(|(href, _)| section == *href || section.starts_with(&format!("{}/", href)))
        .map(|(_, label)| *label)
        .unwrap_or("Dashboard")
}

/// Shell for every signed-in screen. Entering it runs the route guard:
/// no token sends the user to /login, a token is verified once against
/// /auth/verify before the outlet renders.
#[component]
pub fn AdminLayout() -> impl IntoView {
    let session = use_session();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let step = guard_step(
        storage::auth_token().as_deref(),
        session.user.get_untracked().is_some(),
        session.state.get_untracked() == AuthState::Authenticated,
    );
    match step {
        GuardStep::Redirect => session.invalidate(),
        GuardStep::Verify => {
            spawn_local(async move {
                match auth::verify_token().await {
                    Ok(user) => {
                        if let Some(token) = storage::auth_token() {
                            storage::store_session(&token, &user);
                        }
                        session.user.set(Some(user));
                        session.state.set(AuthState::Authenticated);
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("Session verification failed: {}", e).into());
                        session.invalidate();
                    }
                }
            });
        }
        GuardStep::Admit => {}
    }

    Effect::new(move |_| {
        if session.state.get() == AuthState::Anonymous {
            navigate("/login", Default::default());
        }
    });

    Effect::new(move |_| {
        let path = pathname.get();
        if session.state.get() == AuthState::Authenticated {
            storage::remember_last_path(&path);
        }
    });

    let title = move || page_title(&pathname.get()).to_uppercase();
    let email = move || session.user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    view! {
        <Show
            when=move || session.state.get() == AuthState::Authenticated
            fallback=|| view! { <div class="loading-screen">"Checking session..."</div> }
        >
            <div class="admin-layout">
                <aside class="sidebar">
                    <div class="sidebar-brand">"Agency Admin"</div>
                    <nav class="sidebar-nav">
                        {NAV_ITEMS
                            .iter()
                            .map(|(href, label)| view! { <A href=*href attr:class="nav-link">{*label}</A> })
                            .collect_view()}
                    </nav>
                    <button class="nav-link nav-logout" on:click=move |_| session.logout()>"Logout"</button>
                </aside>
                <div class="admin-main">
                    <header class="admin-header">
                        <h1>{title}</h1>
                        <span class="admin-user">{email}</span>
                    </header>
                    <section class="admin-content">
                        <Outlet/>
                    </section>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_the_section() {
        assert_eq!(page_title("/"), "Dashboard");
        assert_eq!(page_title("/team"), "Developers");
        assert_eq!(page_title("/blog/"), "Blog Posts");
        assert_eq!(page_title("/contacts/42"), "Contact Queries");
        assert_eq!(page_title("/teams"), "Dashboard");
    }
}
