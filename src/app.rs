use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::components::AdminLayout;
use crate::features::auth::Session;
use crate::pages::{
    BlogPage, ContactsPage, DashboardPage, EventsPage, LoginPage, NewslettersPage, ProjectsPage, TasksPage, TeamPage,
};

#[component]
pub fn App() -> impl IntoView {
    Session::provide();

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <div class="empty-state">"Page not found."</div> }>
                    <Route path=path!("/login") view=LoginPage/>
                    <ParentRoute path=path!("") view=AdminLayout>
                        <Route path=path!("") view=DashboardPage/>
                        <Route path=path!("team") view=TeamPage/>
                        <Route path=path!("projects") view=ProjectsPage/>
                        <Route path=path!("tasks") view=TasksPage/>
                        <Route path=path!("blog") view=BlogPage/>
                        <Route path=path!("events") view=EventsPage/>
                        <Route path=path!("newsletters") view=NewslettersPage/>
                        <Route path=path!("contacts") view=ContactsPage/>
                    </ParentRoute>
                </Routes>
            </main>
        </Router>
    }
}
