use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::{bind, DetailRow, FormError, Modal};
use crate::core::models::{Priority, Task, TaskDraft, TaskStatus};
use crate::features::kanban::hooks::{TaskForm, TasksHook};

#[component]
pub fn TaskDetailModal(task: Task, tasks: TasksHook) -> impl IntoView {
    let close = Callback::new(move |_| tasks.selected.set(None));
    let for_edit = task.clone();
    let id = task.key.record_id();

    view! {
        <Modal title=task.title.clone() on_close=close>
            <div class="modal-body">
                <div class="badge-row">
                    <span class=task.status.badge_class()>{task.status.label()}</span>
                    <span class=task.priority.badge_class()>{task.priority.label()}</span>
                </div>
                <DetailRow label="Project" value=task.project.clone()/>
                <DetailRow label="Assignee" value=task.assignee.clone()/>
                <DetailRow label="Due date" value=task.due_date.clone()/>
                {task.description.clone().map(|text| view! { <p class="detail-description">{text}</p> })}
            </div>
            <div class="modal-actions">
                {id.map(|id| view! {
                    <button type="button" class="btn-danger" on:click=move |_| tasks.delete.run(id.clone())>"DELETE"</button>
                })}
                <button type="button" class="btn-secondary" on:click=move |_| close.run(())>"CLOSE"</button>
                <button type="button" class="btn-primary" on:click=move |_| tasks.open_edit(&for_edit)>"EDIT"</button>
            </div>
        </Modal>
    }
}

#[component]
pub fn TaskFormModal(form: TaskForm, tasks: TasksHook) -> impl IntoView {
    let editing = form.id.is_some();
    let id = form.id.clone();
    let draft = RwSignal::new(form.draft);
    let close = Callback::new(move |_| tasks.form.set(None));

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        tasks.save.run(TaskForm { id: id.clone(), draft: draft.get_untracked() });
    };

    let heading = if editing { "Edit Task" } else { "Create Task" };

    view! {
        <Modal title=heading on_close=close>
            <form on:submit=handle_submit>
                <FormError error=tasks.form_error/>
                <div class="form-group">
                    <label>"TITLE"</label>
                    <input
                        type="text"
                        placeholder="Task title..."
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=bind(draft, |d, v| d.title = v)
                        required
                    />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"PROJECT"</label>
                        <input
                            type="text"
                            prop:value=move || draft.with(|d| d.project.clone())
                            on:input=bind(draft, |d, v| d.project = v)
                            required
                        />
                    </div>
                    <div class="form-group">
                        <label>"ASSIGNEE"</label>
                        <input
                            type="text"
                            prop:value=move || draft.with(|d| d.assignee.clone())
                            on:input=bind(draft, |d, v| d.assignee = v)
                            required
                        />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"PRIORITY"</label>
                        <select
                            prop:value=move || draft.with(|d| d.priority.as_str())
                            on:change=bind(draft, |d, v| d.priority = v.parse().unwrap_or_default())
                        >
                            {Priority::all()
                                .into_iter()
                                .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"STATUS"</label>
                        <select
                            prop:value=move || draft.with(|d| d.status.as_str())
                            on:change=bind(draft, |d, v| {
                                if let Ok(status) = v.parse::<TaskStatus>() {
                                    d.status = status;
                                }
                            })
                        >
                            {TaskStatus::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"DUE DATE"</label>
                        <input
                            type="date"
                            prop:value=move || draft.with(|d| d.due_date.clone())
                            on:input=bind(draft, |d, v| d.due_date = v)
                        />
                    </div>
                </div>
                <div class="form-group">
                    <label>"DESCRIPTION"</label>
                    <textarea
                        rows="4"
                        placeholder="Task description..."
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=bind(draft, |d, v| d.description = v)
                    ></textarea>
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| close.run(())>"CANCEL"</button>
                    <button type="submit" class="btn-primary" disabled=move || !draft.with(TaskDraft::is_complete)>
                        {if editing { "SAVE CHANGES" } else { "CREATE" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
