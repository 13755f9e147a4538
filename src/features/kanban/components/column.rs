use leptos::prelude::*;
use web_sys::DragEvent;

use super::TaskCard;
use crate::core::models::{Task, TaskStatus};
use crate::features::kanban::board::DragLocation;
use crate::features::kanban::hooks::TasksHook;

#[component]
pub fn KanbanColumn(
    status: TaskStatus,
    tasks: TasksHook,
    drag: RwSignal<Option<DragLocation>>,
) -> impl IntoView {
    let cards = Signal::derive(move || tasks.column(status));
    let on_drop = tasks.drop;
    let on_open = Callback::new(move |task: Task| tasks.selected.set(Some(task)));

    view! {
        <div
            class="kanban-column"
            on:dragover=move |ev: DragEvent| ev.prevent_default()
            on:drop=move |ev: DragEvent| {
                // Dropped on empty space: append after the last rendered card
                ev.prevent_default();
                if let Some(source) = drag.get_untracked() {
                    drag.set(None);
                    let index = cards.with_untracked(Vec::len);
                    on_drop.run((source, Some(DragLocation::new(status, index))));
                }
            }
        >
            <div class="column-header">
                <h3>{status.label()}</h3>
                <span class="task-count">{move || cards.with(Vec::len)}</span>
            </div>
            <div class="column-content">
                {move || {
                    cards
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, task)| {
                            view! {
                                <TaskCard
                                    task=task
                                    location=DragLocation::new(status, index)
                                    drag=drag
                                    on_drop=on_drop
                                    on_open=on_open
                                />
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
