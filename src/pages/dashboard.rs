use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::Notices;
use crate::core::error::ApiError;
use crate::core::models::{Contact, Developer, Project, ProjectStatus, Task, TaskStatus};
use crate::core::services::api;
use crate::features::auth::use_session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub developers: usize,
    pub active_projects: usize,
    pub pending_tasks: usize,
    pub unanswered_contacts: usize,
}

impl DashboardStats {
    pub fn from_lists(developers: &[Developer], projects: &[Project], tasks: &[Task], contacts: &[Contact]) -> Self {
        Self {
            developers: developers.len(),
            active_projects: projects.iter().filter(|p| p.status == ProjectStatus::InProgress).count(),
            pending_tasks: tasks.iter().filter(|t| t.status != TaskStatus::Completed).count(),
            unanswered_contacts: contacts.iter().filter(|c| !c.responded).count(),
        }
    }
}

async fn load_stats() -> Result<DashboardStats, ApiError> {
    let developers = api::list::<Developer>().await?;
    let projects = api::list::<Project>().await?;
    let tasks = api::list::<Task>().await?;
    let contacts = api::list::<Contact>().await?;
    Ok(DashboardStats::from_lists(&developers, &projects, &tasks, &contacts))
}

const QUICK_LINKS: [(&str, &str, &str); 6] = [
    ("/tasks", "Task board", "Move work between columns"),
    ("/projects", "Projects", "Create or update a project"),
    ("/team", "Developers", "Manage the team roster"),
    ("/blog", "Blog", "Write a new post"),
    ("/events", "Events", "Schedule an event"),
    ("/contacts", "Inbox", "Answer contact queries"),
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let stats = RwSignal::new(None::<DashboardStats>);
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        match load_stats().await {
            Ok(loaded) => stats.set(Some(loaded)),
            Err(e) => session.report("Failed to load dashboard", e, error),
        }
    });

    let stat = move |pick: fn(&DashboardStats) -> usize| {
        move || stats.get().map(|s| pick(&s).to_string()).unwrap_or_else(|| "...".into())
    };
    let greeting = move || {
        session.user.with(|u| u.as_ref().map(|u| format!("Welcome back, {}", u.email)).unwrap_or_default())
    };

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h2>"Dashboard"</h2>
                    <p class="page-subtitle">{greeting}</p>
                </div>
            </div>
            <Notices error=error/>
            <div class="stat-grid">
                <div class="stat-card">
                    <span class="stat-value">{stat(|s| s.developers)}</span>
                    <span class="stat-label">"Developers"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{stat(|s| s.active_projects)}</span>
                    <span class="stat-label">"Active projects"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{stat(|s| s.pending_tasks)}</span>
                    <span class="stat-label">"Pending tasks"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{stat(|s| s.unanswered_contacts)}</span>
                    <span class="stat-label">"Unanswered messages"</span>
                </div>
            </div>
            <h3 class="section-title">"Quick actions"</h3>
            <div class="quick-links">
                {QUICK_LINKS
                    .iter()
                    .map(|(href, label, hint)| view! {
                        <A href=*href attr:class="quick-link">
                            <strong>{*label}</strong>
                            <span class="muted">{*hint}</span>
                        </A>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
