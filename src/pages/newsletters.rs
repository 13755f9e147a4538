use chrono::Utc;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{bind, confirm, DetailRow, EmptyState, FilterSelect, FormError, ListHeader, Modal, Notices, SearchBar};
use crate::core::filter::{distinct_values, ListQuery};
use crate::core::models::newsletter::{newsletter_status_class, NEWSLETTER_STATUSES};
use crate::core::models::{Newsletter, NewsletterDraft, RecordId, Resource};
use crate::core::services::api;
use crate::features::listing::{empty_message, save_form, use_collection, Collection, EditState};

type NewsletterForm = EditState<NewsletterDraft>;

fn send_newsletter(newsletters: Collection<Newsletter>, id: RecordId, title: String) {
    if !confirm(&format!("Send \"{}\" to all subscribers now?", title)) {
        return;
    }
    spawn_local(async move {
        match api::action::<Newsletter>(&id, "send", "POST", None).await {
            Ok(body) => {
                match api::decode_item::<Newsletter>(body) {
                    Ok(sent) if sent.record_id().is_some() => newsletters.saved(sent),
                    _ => newsletters.items.update(|items| {
                        if let Some(n) = items.iter_mut().find(|n| n.record_id().as_ref() == Some(&id)) {
                            n.status = "sent".into();
                            n.last_sent = Utc::now().format("%Y-%m-%d").to_string();
                        }
                    }),
                }
                newsletters.flash(format!("\"{}\" sent", title));
            }
            Err(e) => newsletters.fail("Failed to send newsletter", e),
        }
    });
}

#[component]
pub fn NewslettersPage() -> impl IntoView {
    let newsletters = use_collection::<Newsletter>(ListQuery::default());
    let selected = RwSignal::new(None::<Newsletter>);
    let form = RwSignal::new(None::<NewsletterForm>);

    let status_options = Signal::derive(move || {
        newsletters.items.with(|items| {
            distinct_values(items, |n: &Newsletter| Some(n.status.clone()))
                .into_iter()
                .map(|status| {
                    let label = NEWSLETTER_STATUSES
                        .iter()
                        .find(|(value, _)| *value == status)
                        .map(|(_, label)| label.to_string())
                        .unwrap_or_else(|| status.clone());
                    (status, label)
                })
                .collect::<Vec<_>>()
        })
    });
    let placeholder = Signal::derive(move || newsletters.query.with(|q| empty_message("newsletters", q)));

    view! {
        <div class="page">
            <ListHeader
                title="Newsletters"
                subtitle="Draft, schedule and send campaigns"
                action="New Newsletter"
                on_action=Callback::new(move |_| form.set(Some(NewsletterForm::create())))
            />
            <Notices error=newsletters.error notice=newsletters.notice/>
            <div class="list-controls">
                <SearchBar placeholder="Search by title..." query=newsletters.query/>
                <FilterSelect query=newsletters.query all_label="All Statuses" options=status_options/>
            </div>
            <Show when=move || !newsletters.loading.get() fallback=|| view! { <div class="loading">"Loading newsletters..."</div> }>
                {move || {
                    let rows = newsletters.visible();
                    if rows.is_empty() {
                        return view! { <EmptyState message=placeholder/> }.into_any();
                    }
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Title"</th>
                                    <th>"Subscribers"</th>
                                    <th>"Last sent"</th>
                                    <th>"Status"</th>
                                    <th>"Open rate"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows
                                    .into_iter()
                                    .map(|n| view! { <NewsletterRow newsletter=n newsletters=newsletters selected=selected/> })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any()
                }}
            </Show>
            {move || selected.get().map(|n| view! { <NewsletterDetail newsletter=n newsletters=newsletters selected=selected form=form/> })}
            {move || form.get().map(|state| view! { <NewsletterFormModal state=state newsletters=newsletters form=form/> })}
        </div>
    }
}

#[component]
fn NewsletterRow(
    newsletter: Newsletter,
    newsletters: Collection<Newsletter>,
    selected: RwSignal<Option<Newsletter>>,
) -> impl IntoView {
    let title = newsletter.title.clone();
    let last_sent = if newsletter.last_sent.is_empty() { "-".to_string() } else { newsletter.last_sent.clone() };
    let badge = newsletter_status_class(&newsletter.status);
    let status = newsletter.status.clone();
    let open_rate = newsletter.open_rate.clone();
    let subscribers = newsletter.subscribers;
    let sendable = newsletter.record_id().filter(|_| !newsletter.is_sent());
    let send_title = newsletter.title.clone();

    view! {
        <tr class="clickable" on:click=move |_| selected.set(Some(newsletter.clone()))>
            <td>{title}</td>
            <td>{subscribers}</td>
            <td>{last_sent}</td>
            <td><span class=badge>{status}</span></td>
            <td>{open_rate}</td>
            <td>
                {sendable.map(|id| view! {
                    <button
                        type="button"
                        class="btn-secondary btn-small"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            send_newsletter(newsletters, id.clone(), send_title.clone());
                        }
                    >
                        "SEND"
                    </button>
                })}
            </td>
        </tr>
    }
}

#[component]
fn NewsletterDetail(
    newsletter: Newsletter,
    newsletters: Collection<Newsletter>,
    selected: RwSignal<Option<Newsletter>>,
    form: RwSignal<Option<NewsletterForm>>,
) -> impl IntoView {
    let close = Callback::new(move |_| selected.set(None));
    let id = newsletter.record_id();
    let for_edit = newsletter.clone();

    view! {
        <Modal title=newsletter.title.clone() on_close=close>
            <div class="modal-body">
                <DetailRow label="Status" value=newsletter.status.clone()/>
                <DetailRow label="Subscribers" value=newsletter.subscribers.to_string()/>
                <DetailRow label="Last sent" value=newsletter.last_sent.clone()/>
                <DetailRow label="Open rate" value=newsletter.open_rate.clone()/>
            </div>
            <div class="modal-actions">
                {id.map(|id| view! {
                    <button
                        type="button"
                        class="btn-danger"
                        on:click=move |_| newsletters.delete(id.clone(), "newsletter", move || selected.set(None))
                    >
                        "DELETE"
                    </button>
                })}
                <button
                    type="button"
                    class="btn-primary"
                    on:click=move |_| {
                        selected.set(None);
                        form.set(Some(NewsletterForm::edit(&for_edit)));
                    }
                >
                    "EDIT"
                </button>
            </div>
        </Modal>
    }
}

#[component]
fn NewsletterFormModal(
    state: NewsletterForm,
    newsletters: Collection<Newsletter>,
    form: RwSignal<Option<NewsletterForm>>,
) -> impl IntoView {
    let editing = state.is_edit();
    let id = state.id.clone();
    let draft = RwSignal::new(state.draft);
    let form_error = RwSignal::new(None::<String>);
    let close = Callback::new(move |_| form.set(None));
    let heading = if editing { "Edit Newsletter" } else { "New Newsletter" };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        if let Err(e) = current.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        let message = if editing { "Newsletter updated" } else { "Newsletter created" };
        newsletters.persist(save_form::<Newsletter>(id.clone(), current.form_fields(), None), form_error, move || {
            form.set(None);
            newsletters.flash(message);
        });
    };

    view! {
        <Modal title=heading on_close=close>
            <form on:submit=handle_submit>
                <FormError error=form_error/>
                <div class="form-group">
                    <label>"TITLE"</label>
                    <input type="text" prop:value=move || draft.with(|d| d.title.clone()) on:input=bind(draft, |d, v| d.title = v) required/>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"STATUS"</label>
                        <select prop:value=move || draft.with(|d| d.status.clone()) on:change=bind(draft, |d, v| d.status = v)>
                            {NEWSLETTER_STATUSES.iter().map(|(value, label)| view! { <option value=*value>{*label}</option> }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"SUBSCRIBERS"</label>
                        <input
                            type="number"
                            min="0"
                            prop:value=move || draft.with(|d| d.subscribers.to_string())
                            on:input=bind(draft, |d, v| d.subscribers = v.trim().parse().unwrap_or(0))
                        />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"LAST SENT"</label>
                        <input type="date" prop:value=move || draft.with(|d| d.last_sent.clone()) on:input=bind(draft, |d, v| d.last_sent = v)/>
                    </div>
                    <div class="form-group">
                        <label>"OPEN RATE"</label>
                        <input type="text" placeholder="42%" prop:value=move || draft.with(|d| d.open_rate.clone()) on:input=bind(draft, |d, v| d.open_rate = v)/>
                    </div>
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| close.run(())>"CANCEL"</button>
                    <button type="submit" class="btn-primary">{if editing { "SAVE CHANGES" } else { "CREATE" }}</button>
                </div>
            </form>
        </Modal>
    }
}
