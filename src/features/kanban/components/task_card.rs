use leptos::prelude::*;
use web_sys::DragEvent;

use crate::core::models::Task;
use crate::features::kanban::board::DragLocation;

// One draggable card; dropping another card on it inserts at this card's index
#[component]
pub fn TaskCard(
    task: Task,
    location: DragLocation,
    drag: RwSignal<Option<DragLocation>>,
    on_drop: Callback<(DragLocation, Option<DragLocation>)>,
    on_open: Callback<Task>,
) -> impl IntoView {
    let title = task.title.clone();
    let due = task.due_date.clone();
    let project = task.project.clone();
    let assignee = task.assignee.clone();
    let priority = task.priority;
    let id = task.key.record_id().map(|id| id.to_string()).unwrap_or_default();

    view! {
        <div
            class="task-card clickable"
            class:dragging=move || drag.get() == Some(location)
            draggable="true"
            on:dragstart=move |ev: DragEvent| {
                if let Some(data) = ev.data_transfer() {
                    let _ = data.set_data("text/plain", &id);
                }
                drag.set(Some(location));
            }
            on:dragover=move |ev: DragEvent| ev.prevent_default()
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                if let Some(source) = drag.get_untracked() {
                    drag.set(None);
                    on_drop.run((source, Some(location)));
                }
            }
            on:dragend=move |_| {
                // Released outside any column
                if let Some(source) = drag.get_untracked() {
                    drag.set(None);
                    on_drop.run((source, None));
                }
            }
            on:click=move |_| on_open.run(task.clone())
        >
            <div class="task-card-header">
                <h4>{title}</h4>
                <span class=priority.badge_class()>{priority.label()}</span>
            </div>
            <p class="task-project">{project}</p>
            <div class="task-card-footer">
                <span class="task-assignee">{assignee}</span>
                <span class="task-due">{due}</span>
            </div>
        </div>
    }
}
