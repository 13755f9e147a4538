use leptos::prelude::*;

use crate::components::{FilterSelect, ListHeader, Notices, SearchBar};
use crate::core::models::TaskStatus;
use crate::features::kanban::{use_tasks, DragLocation, KanbanColumn, TaskDetailModal, TaskFormModal};
use crate::features::listing::empty_message;

#[component]
pub fn TasksPage() -> impl IntoView {
    let tasks = use_tasks();
    let drag = RwSignal::new(None::<DragLocation>);

    let status_options = Signal::derive(|| {
        TaskStatus::all()
            .into_iter()
            .map(|s| (s.as_str().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });

    // Shown above the board when the filter hides every card
    let nothing_visible = move || {
        let shown: usize = TaskStatus::all().into_iter().map(|s| tasks.column(s).len()).sum();
        (shown == 0).then(|| tasks.query.with(|q| empty_message("tasks", q)))
    };

    view! {
        <div class="page">
            <ListHeader
                title="Tasks"
                subtitle="Drag cards between columns to update their status"
                action="New Task"
                on_action=Callback::new(move |_| tasks.open_create())
            />
            <Notices error=tasks.error/>
            <div class="list-controls">
                <SearchBar placeholder="Search by title, project or assignee..." query=tasks.query/>
                <FilterSelect query=tasks.query all_label="All Statuses" options=status_options/>
            </div>
            <Show when=move || !tasks.loading.get() fallback=|| view! { <div class="loading">"Loading tasks..."</div> }>
                {move || nothing_visible().map(|message| view! { <div class="empty-state">{message}</div> })}
                <div class="kanban-board">
                    {TaskStatus::all()
                        .into_iter()
                        .map(|status| view! { <KanbanColumn status=status tasks=tasks drag=drag/> })
                        .collect_view()}
                </div>
            </Show>
            {move || tasks.selected.get().map(|task| view! { <TaskDetailModal task=task tasks=tasks/> })}
            {move || tasks.form.get().map(|form| view! { <TaskFormModal form=form tasks=tasks/> })}
        </div>
    }
}
