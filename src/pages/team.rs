use leptos::ev::{KeyboardEvent, SubmitEvent};
use leptos::prelude::*;

use crate::components::{bind, DetailRow, EmptyState, FilterSelect, FormError, ListHeader, Modal, Notices, SearchBar};
use crate::core::filter::ListQuery;
use crate::core::models::developer::ROLES;
use crate::core::models::{Availability, Developer, DeveloperDraft};
use crate::features::listing::{empty_message, save_json, use_collection, Collection, EditState};

type DeveloperForm = EditState<DeveloperDraft>;

#[component]
pub fn TeamPage() -> impl IntoView {
    let team = use_collection::<Developer>(ListQuery::default());
    let selected = RwSignal::new(None::<Developer>);
    let form = RwSignal::new(None::<DeveloperForm>);

    let status_options = Signal::derive(|| {
        Availability::all()
            .into_iter()
            .map(|s| (s.as_str().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });
    let placeholder = Signal::derive(move || team.query.with(|q| empty_message("developers", q)));

    view! {
        <div class="page">
            <ListHeader
                title="Developers"
                subtitle="Manage your development team"
                action="Add Developer"
                on_action=Callback::new(move |_| form.set(Some(DeveloperForm::create())))
            />
            <Notices error=team.error notice=team.notice/>
            <div class="list-controls">
                <SearchBar placeholder="Search by name, role or email..." query=team.query/>
                <FilterSelect query=team.query all_label="All Statuses" options=status_options/>
            </div>
            <Show when=move || !team.loading.get() fallback=|| view! { <div class="loading">"Loading developers..."</div> }>
                {move || {
                    let developers = team.visible();
                    if developers.is_empty() {
                        return view! { <EmptyState message=placeholder/> }.into_any();
                    }
                    view! {
                        <div class="card-grid">
                            {developers
                                .into_iter()
                                .map(|dev| view! { <DeveloperCard dev=dev selected=selected/> })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </Show>
            {move || selected.get().map(|dev| view! { <DeveloperDetail dev=dev team=team selected=selected form=form/> })}
            {move || form.get().map(|state| view! { <DeveloperFormModal state=state team=team form=form/> })}
        </div>
    }
}

#[component]
fn DeveloperCard(dev: Developer, selected: RwSignal<Option<Developer>>) -> impl IntoView {
    let initials = dev.initials();
    let avatar = (!dev.avatar.is_empty()).then(|| dev.avatar.clone());
    let summary = format!("{} projects · {} tasks", dev.projects, dev.tasks);
    let name = dev.name.clone();
    let role = dev.role.clone();
    let email = dev.email.clone();
    let status = dev.status;

    view! {
        <div class="entity-card clickable" on:click=move |_| selected.set(Some(dev.clone()))>
            <div class="entity-card-header">
                {match avatar {
                    Some(src) => view! { <img class="avatar" src=src alt="avatar"/> }.into_any(),
                    None => view! { <div class="avatar avatar-initials">{initials}</div> }.into_any(),
                }}
                <div>
                    <h4>{name}</h4>
                    <p class="muted">{role}</p>
                </div>
                <span class=status.badge_class()>{status.label()}</span>
            </div>
            <p class="muted">{email}</p>
            <p class="entity-card-footer">{summary}</p>
        </div>
    }
}

#[component]
fn DeveloperDetail(
    dev: Developer,
    team: Collection<Developer>,
    selected: RwSignal<Option<Developer>>,
    form: RwSignal<Option<DeveloperForm>>,
) -> impl IntoView {
    let close = Callback::new(move |_| selected.set(None));
    let id = dev.key.record_id();
    let for_edit = dev.clone();

    view! {
        <Modal title=dev.name.clone() on_close=close>
            <div class="modal-body">
                <DetailRow label="Email" value=dev.email.clone()/>
                <DetailRow label="Role" value=dev.role.clone()/>
                <DetailRow label="Status" value=dev.status.label()/>
                <DetailRow label="Rate" value=dev.rate.clone()/>
                <DetailRow label="Phone" value=dev.phone.clone().unwrap_or_else(|| "-".into())/>
                <DetailRow label="Joined" value=dev.join_date.clone().unwrap_or_else(|| "-".into())/>
                <div class="tag-list">
                    {dev.skills.iter().map(|s| view! { <span class="tag">{s.clone()}</span> }).collect_view()}
                </div>
                {dev.bio.clone().map(|bio| view! { <p class="detail-description">{bio}</p> })}
            </div>
            <div class="modal-actions">
                {id.map(|id| view! {
                    <button
                        type="button"
                        class="btn-danger"
                        on:click=move |_| team.delete(id.clone(), "developer", move || selected.set(None))
                    >
                        "DELETE"
                    </button>
                })}
                <button
                    type="button"
                    class="btn-primary"
                    on:click=move |_| {
                        selected.set(None);
                        form.set(Some(DeveloperForm::edit(&for_edit)));
                    }
                >
                    "EDIT"
                </button>
            </div>
        </Modal>
    }
}

#[component]
fn DeveloperFormModal(
    state: DeveloperForm,
    team: Collection<Developer>,
    form: RwSignal<Option<DeveloperForm>>,
) -> impl IntoView {
    let editing = state.is_edit();
    let id = state.id.clone();
    let draft = RwSignal::new(state.draft);
    let skill_input = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let close = Callback::new(move |_| form.set(None));
    let heading = if editing { "Edit Developer" } else { "Add Developer" };

    let add_skill = move || {
        let raw = skill_input.get_untracked();
        draft.update(|d| {
            d.add_skill(&raw);
        });
        skill_input.set(String::new());
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        if let Err(e) = current.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        let message = if editing { "Developer updated" } else { "Developer added" };
        team.persist(save_json::<Developer>(id.clone(), current.to_payload()), form_error, move || {
            form.set(None);
            team.flash(message);
        });
    };

    view! {
        <Modal title=heading on_close=close wide=true>
            <form on:submit=handle_submit>
                <FormError error=form_error/>
                <div class="form-row">
                    <div class="form-group">
                        <label>"NAME"</label>
                        <input type="text" prop:value=move || draft.with(|d| d.name.clone()) on:input=bind(draft, |d, v| d.name = v) required/>
                    </div>
                    <div class="form-group">
                        <label>"EMAIL"</label>
                        <input type="email" prop:value=move || draft.with(|d| d.email.clone()) on:input=bind(draft, |d, v| d.email = v) required/>
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"ROLE"</label>
                        <select prop:value=move || draft.with(|d| d.role.clone()) on:change=bind(draft, |d, v| d.role = v)>
                            {ROLES.iter().map(|(value, label)| view! { <option value=*value>{*label}</option> }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"STATUS"</label>
                        <select
                            prop:value=move || draft.with(|d| d.status.as_str())
                            on:change=bind(draft, |d, v| d.status = Availability::parse(&v).unwrap_or_default())
                        >
                            {Availability::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"RATE"</label>
                        <input type="text" placeholder="$80/hr" prop:value=move || draft.with(|d| d.rate.clone()) on:input=bind(draft, |d, v| d.rate = v)/>
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"PHONE"</label>
                        <input type="tel" prop:value=move || draft.with(|d| d.phone.clone()) on:input=bind(draft, |d, v| d.phone = v)/>
                    </div>
                    <div class="form-group">
                        <label>"AVATAR URL"</label>
                        <input type="url" prop:value=move || draft.with(|d| d.avatar.clone()) on:input=bind(draft, |d, v| d.avatar = v)/>
                    </div>
                </div>
                <div class="form-group">
                    <label>"SKILLS"</label>
                    <div class="tag-input">
                        <input
                            type="text"
                            placeholder="Type a skill and press Enter"
                            prop:value=move || skill_input.get()
                            on:input=move |ev| skill_input.set(event_target_value(&ev))
                            on:keydown=move |ev: KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    add_skill();
                                }
                            }
                        />
                        <button type="button" class="btn-secondary" on:click=move |_| add_skill()>"ADD"</button>
                    </div>
                    <div class="tag-list">
                        {move || {
                            draft
                                .with(|d| d.skills.clone())
                                .into_iter()
                                .map(|skill| {
                                    let name = skill.clone();
                                    view! {
                                        <span class="tag">
                                            {skill}
                                            <button type="button" class="tag-remove" on:click=move |_| draft.update(|d| d.remove_skill(&name))>"×"</button>
                                        </span>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
                <div class="form-group">
                    <label>"BIO"</label>
                    <textarea rows="3" prop:value=move || draft.with(|d| d.bio.clone()) on:input=bind(draft, |d, v| d.bio = v)></textarea>
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| close.run(())>"CANCEL"</button>
                    <button type="submit" class="btn-primary">{if editing { "SAVE CHANGES" } else { "ADD DEVELOPER" }}</button>
                </div>
            </form>
        </Modal>
    }
}
