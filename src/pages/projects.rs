use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::{bind, DetailRow, EmptyState, FilterSelect, FormError, ListHeader, Modal, Notices, SearchBar};
use crate::core::filter::ListQuery;
use crate::core::models::{Project, ProjectDraft, ProjectStatus};
use crate::features::listing::{empty_message, save_json, use_collection, Collection, EditState};

type ProjectForm = EditState<ProjectDraft>;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let projects = use_collection::<Project>(ListQuery::default());
    let selected = RwSignal::new(None::<Project>);
    let form = RwSignal::new(None::<ProjectForm>);

    let status_options = Signal::derive(|| {
        ProjectStatus::all()
            .into_iter()
            .map(|s| (s.as_str().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });
    let placeholder = Signal::derive(move || projects.query.with(|q| empty_message("projects", q)));

    view! {
        <div class="page">
            <ListHeader
                title="Projects"
                subtitle="Track client work and delivery"
                action="New Project"
                on_action=Callback::new(move |_| form.set(Some(ProjectForm::create())))
            />
            <Notices error=projects.error notice=projects.notice/>
            <div class="list-controls">
                <SearchBar placeholder="Search by name or client..." query=projects.query/>
                <FilterSelect query=projects.query all_label="All Statuses" options=status_options/>
            </div>
            <Show when=move || !projects.loading.get() fallback=|| view! { <div class="loading">"Loading projects..."</div> }>
                {move || {
                    let rows = projects.visible();
                    if rows.is_empty() {
                        return view! { <EmptyState message=placeholder/> }.into_any();
                    }
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Project"</th>
                                    <th>"Client"</th>
                                    <th>"Status"</th>
                                    <th>"Progress"</th>
                                    <th>"Team"</th>
                                    <th>"Deadline"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|p| view! { <ProjectRow project=p selected=selected/> }).collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any()
                }}
            </Show>
            {move || selected.get().map(|p| view! { <ProjectDetail project=p projects=projects selected=selected form=form/> })}
            {move || form.get().map(|state| view! { <ProjectFormModal state=state projects=projects form=form/> })}
        </div>
    }
}

#[component]
fn ProgressBar(value: u8) -> impl IntoView {
    view! {
        <div class="progress">
            <div class="progress-fill" style=format!("width: {}%", value)></div>
            <span class="progress-label">{format!("{}%", value)}</span>
        </div>
    }
}

#[component]
fn ProjectRow(project: Project, selected: RwSignal<Option<Project>>) -> impl IntoView {
    let name = project.name.clone();
    let client = project.client.clone();
    let deadline = project.deadline.clone();
    let (status, progress, team) = (project.status, project.progress, project.team);

    view! {
        <tr class="clickable" on:click=move |_| selected.set(Some(project.clone()))>
            <td>{name}</td>
            <td>{client}</td>
            <td><span class=status.badge_class()>{status.label()}</span></td>
            <td><ProgressBar value=progress/></td>
            <td>{team}</td>
            <td>{deadline}</td>
        </tr>
    }
}

#[component]
fn ProjectDetail(
    project: Project,
    projects: Collection<Project>,
    selected: RwSignal<Option<Project>>,
    form: RwSignal<Option<ProjectForm>>,
) -> impl IntoView {
    let close = Callback::new(move |_| selected.set(None));
    let id = project.key.record_id();
    let for_edit = project.clone();

    view! {
        <Modal title=project.name.clone() on_close=close>
            <div class="modal-body">
                <DetailRow label="Client" value=project.client.clone()/>
                <DetailRow label="Status" value=project.status.label()/>
                <DetailRow label="Team size" value=project.team.to_string()/>
                <DetailRow label="Deadline" value=project.deadline.clone()/>
                <ProgressBar value=project.progress/>
                {project.description.clone().map(|text| view! { <p class="detail-description">{text}</p> })}
            </div>
            <div class="modal-actions">
                {id.map(|id| view! {
                    <button
                        type="button"
                        class="btn-danger"
                        on:click=move |_| projects.delete(id.clone(), "project", move || selected.set(None))
                    >
                        "DELETE"
                    </button>
                })}
                <button
                    type="button"
                    class="btn-primary"
                    on:click=move |_| {
                        selected.set(None);
                        form.set(Some(ProjectForm::edit(&for_edit)));
                    }
                >
                    "EDIT"
                </button>
            </div>
        </Modal>
    }
}

#[component]
fn ProjectFormModal(state: ProjectForm, projects: Collection<Project>, form: RwSignal<Option<ProjectForm>>) -> impl IntoView {
    let editing = state.is_edit();
    let id = state.id.clone();
    let draft = RwSignal::new(state.draft);
    let form_error = RwSignal::new(None::<String>);
    let close = Callback::new(move |_| form.set(None));
    let heading = if editing { "Edit Project" } else { "New Project" };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        if let Err(e) = current.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        let message = if editing { "Project updated" } else { "Project created" };
        projects.persist(save_json::<Project>(id.clone(), current.to_payload()), form_error, move || {
            form.set(None);
            projects.flash(message);
        });
    };

    view! {
        <Modal title=heading on_close=close>
            <form on:submit=handle_submit>
                <FormError error=form_error/>
                <div class="form-row">
                    <div class="form-group">
                        <label>"NAME"</label>
                        <input type="text" prop:value=move || draft.with(|d| d.name.clone()) on:input=bind(draft, |d, v| d.name = v) required/>
                    </div>
                    <div class="form-group">
                        <label>"CLIENT"</label>
                        <input type="text" prop:value=move || draft.with(|d| d.client.clone()) on:input=bind(draft, |d, v| d.client = v) required/>
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"STATUS"</label>
                        <select
                            prop:value=move || draft.with(|d| d.status.as_str())
                            on:change=bind(draft, |d, v| d.status = ProjectStatus::parse(&v).unwrap_or_default())
                        >
                            {ProjectStatus::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"PROGRESS (%)"</label>
                        <input
                            type="number"
                            min="0"
                            max="100"
                            prop:value=move || draft.with(|d| d.progress.to_string())
                            on:input=bind(draft, |d, v| d.set_progress(&v))
                        />
                    </div>
                    <div class="form-group">
                        <label>"TEAM SIZE"</label>
                        <input
                            type="number"
                            min="0"
                            prop:value=move || draft.with(|d| d.team.to_string())
                            on:input=bind(draft, |d, v| d.team = v.trim().parse().unwrap_or(0))
                        />
                    </div>
                    <div class="form-group">
                        <label>"DEADLINE"</label>
                        <input type="date" prop:value=move || draft.with(|d| d.deadline.clone()) on:input=bind(draft, |d, v| d.deadline = v)/>
                    </div>
                </div>
                <div class="form-group">
                    <label>"DESCRIPTION"</label>
                    <textarea rows="3" prop:value=move || draft.with(|d| d.description.clone()) on:input=bind(draft, |d, v| d.description = v)></textarea>
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| close.run(())>"CANCEL"</button>
                    <button type="submit" class="btn-primary">{if editing { "SAVE CHANGES" } else { "CREATE" }}</button>
                </div>
            </form>
        </Modal>
    }
}
