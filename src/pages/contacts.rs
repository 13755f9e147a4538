use chrono::Utc;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DetailRow, EmptyState, FilterSelect, FormError, ListHeader, Modal, Notices, SearchBar};
use crate::core::filter::ListQuery;
use crate::core::models::contact::{validate_response, FILTER_NEW, FILTER_RESPONDED};
use crate::core::models::{display_date, Contact, RecordId, Resource};
use crate::core::services::api;
use crate::features::listing::{empty_message, use_collection, Collection};

#[component]
pub fn ContactsPage() -> impl IntoView {
    let contacts = use_collection::<Contact>(ListQuery::default());
    let selected = RwSignal::new(None::<Contact>);

    let triage_options = Signal::derive(|| {
        vec![
            (FILTER_NEW.to_string(), "New".to_string()),
            (FILTER_RESPONDED.to_string(), "Responded".to_string()),
        ]
    });
    let placeholder = Signal::derive(move || contacts.query.with(|q| empty_message("contact queries", q)));
    let unanswered = move || contacts.items.with(|items| items.iter().filter(|c| !c.responded).count());

    view! {
        <div class="page">
            <ListHeader title="Contact Queries" subtitle="Messages sent through the public contact form"/>
            <Notices error=contacts.error notice=contacts.notice/>
            <div class="list-controls">
                <SearchBar placeholder="Search by name, email or message..." query=contacts.query/>
                <FilterSelect query=contacts.query all_label="All Messages" options=triage_options/>
                <span class="muted">{move || format!("{} awaiting a response", unanswered())}</span>
            </div>
            <Show when=move || !contacts.loading.get() fallback=|| view! { <div class="loading">"Loading messages..."</div> }>
                {move || {
                    let rows = contacts.visible();
                    if rows.is_empty() {
                        return view! { <EmptyState message=placeholder/> }.into_any();
                    }
                    view! {
                        <div class="message-list">
                            {rows.into_iter().map(|c| view! { <ContactRow contact=c selected=selected/> }).collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </Show>
            {move || selected.get().map(|c| view! { <ContactDetail contact=c contacts=contacts selected=selected/> })}
        </div>
    }
}

#[component]
fn ContactRow(contact: Contact, selected: RwSignal<Option<Contact>>) -> impl IntoView {
    let name = contact.name.clone();
    let email = contact.email.clone();
    let preview: String = contact.message.chars().take(120).collect();
    let date = display_date(&contact.created_at);
    let responded = contact.responded;
    let (badge, state) = if responded { ("badge badge-green", "Responded") } else { ("badge badge-blue", "New") };

    view! {
        <div class="message-row clickable" class:unread=move || !responded on:click=move |_| selected.set(Some(contact.clone()))>
            <div class="message-row-header">
                <strong>{name}</strong>
                <span class="muted">{email}</span>
                <span class=badge>{state}</span>
            </div>
            <p class="muted">{preview}</p>
            <span class="message-date">{date}</span>
        </div>
    }
}

// Detail modal; re-reads the record so a response written elsewhere shows up
#[component]
fn ContactDetail(contact: Contact, contacts: Collection<Contact>, selected: RwSignal<Option<Contact>>) -> impl IntoView {
    let current = RwSignal::new(contact.clone());
    let reply = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let sending = RwSignal::new(false);
    let close = Callback::new(move |_| selected.set(None));
    let id = contact.record_id();
    let heading = format!("Message from {}", contact.name);

    if let Some(id) = id.clone() {
        spawn_local(async move {
            match api::fetch_one::<Contact>(&id).await {
                Ok(fresh) => current.set(fresh),
                Err(e) => web_sys::console::error_1(&format!("Failed to refresh contact {}: {}", id, e).into()),
            }
        });
    }

    let respond = {
        let id = id.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let Some(id) = id.clone() else {
                return;
            };
            let text = reply.get_untracked();
            if let Err(e) = validate_response(&text) {
                form_error.set(Some(e.to_string()));
                return;
            }
            sending.set(true);
            send_response(contacts, id, text, current, form_error, sending);
        }
    };

    view! {
        <Modal title=heading on_close=close wide=true>
            <div class="modal-body">
                <DetailRow label="Email" value=contact.email.clone()/>
                <DetailRow label="Company" value=contact.company_label()/>
                <DetailRow label="Service Interest" value=contact.service_label()/>
                <DetailRow label="Received" value=display_date(&contact.created_at)/>
                <div class="detail-description">{move || current.with(|c| c.message.clone())}</div>
                {move || {
                    current.with(|c| {
                        c.response.clone().map(|text| {
                            let when = display_date(&c.responded_at);
                            view! {
                                <div class="response-block">
                                    <h4>{format!("Response ({})", when)}</h4>
                                    <p>{text}</p>
                                </div>
                            }
                        })
                    })
                }}
            </div>
            <Show when=move || !current.with(|c| c.responded)>
                <form class="response-form" on:submit=respond.clone()>
                    <FormError error=form_error/>
                    <div class="form-group">
                        <label>"RESPONSE"</label>
                        <textarea
                            rows="5"
                            placeholder="Write your reply..."
                            prop:value=move || reply.get()
                            on:input=move |ev| reply.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="modal-actions">
                        <button type="submit" class="btn-primary" disabled=move || sending.get()>
                            {move || if sending.get() { "SENDING..." } else { "SEND RESPONSE" }}
                        </button>
                    </div>
                </form>
            </Show>
            <div class="modal-actions">
                {id.map(|id| view! {
                    <button
                        type="button"
                        class="btn-danger"
                        on:click=move |_| contacts.delete(id.clone(), "message", move || selected.set(None))
                    >
                        "DELETE"
                    </button>
                })}
                <button type="button" class="btn-secondary" on:click=move |_| close.run(())>"CLOSE"</button>
            </div>
        </Modal>
    }
}

fn send_response(
    contacts: Collection<Contact>,
    id: RecordId,
    text: String,
    current: RwSignal<Contact>,
    form_error: RwSignal<Option<String>>,
    sending: RwSignal<bool>,
) {
    spawn_local(async move {
        let payload = serde_json::json!({ "response": text });
        match api::action::<Contact>(&id, "respond", "POST", Some(payload)).await {
            Ok(body) => {
                let updated = match api::decode_item::<Contact>(body) {
                    Ok(contact) if contact.record_id().is_some() => contact,
                    _ => {
                        let mut local = current.get_untracked();
                        local.responded = true;
                        local.response = Some(text);
                        local.responded_at = Some(Utc::now());
                        local
                    }
                };
                current.set(updated.clone());
                contacts.saved(updated);
                contacts.flash("Response sent");
            }
            Err(e) => contacts.report("Failed to send response", e, form_error),
        }
        sending.set(false);
    });
}
