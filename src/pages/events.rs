use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::{bind, DetailRow, EmptyState, FilterSelect, FormError, ListHeader, Modal, Notices, SearchBar};
use crate::core::filter::{distinct_values, ListQuery};
use crate::core::models::event::{event_type_class, EVENT_TYPES};
use crate::core::models::{Event, EventDraft};
use crate::features::listing::{empty_message, save_form, use_collection, Collection, EditState};

type EventForm = EditState<EventDraft>;

fn type_label(kind: &str) -> String {
    EVENT_TYPES
        .iter()
        .find(|(value, _)| *value == kind)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| kind.to_string())
}

#[component]
pub fn EventsPage() -> impl IntoView {
    let events = use_collection::<Event>(ListQuery::default());
    let selected = RwSignal::new(None::<Event>);
    let form = RwSignal::new(None::<EventForm>);

    // Only types that actually occur in the list
    let type_options = Signal::derive(move || {
        events.items.with(|items| {
            distinct_values(items, |e: &Event| Some(e.kind.clone()))
                .into_iter()
                .map(|kind| (kind.clone(), type_label(&kind)))
                .collect::<Vec<_>>()
        })
    });
    let placeholder = Signal::derive(move || events.query.with(|q| empty_message("events", q)));

    view! {
        <div class="page">
            <ListHeader
                title="Events"
                subtitle="Workshops, webinars and meetings"
                action="New Event"
                on_action=Callback::new(move |_| form.set(Some(EventForm::create())))
            />
            <Notices error=events.error notice=events.notice/>
            <div class="list-controls">
                <SearchBar placeholder="Search by title or location..." query=events.query/>
                <FilterSelect query=events.query all_label="All Types" options=type_options/>
            </div>
            <Show when=move || !events.loading.get() fallback=|| view! { <div class="loading">"Loading events..."</div> }>
                {move || {
                    let rows = events.visible();
                    if rows.is_empty() {
                        return view! { <EmptyState message=placeholder/> }.into_any();
                    }
                    view! {
                        <div class="card-grid">
                            {rows.into_iter().map(|event| view! { <EventCard event=event selected=selected/> }).collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </Show>
            {move || selected.get().map(|event| view! { <EventDetail event=event events=events selected=selected form=form/> })}
            {move || form.get().map(|state| view! { <EventFormModal state=state events=events form=form/> })}
        </div>
    }
}

#[component]
fn EventCard(event: Event, selected: RwSignal<Option<Event>>) -> impl IntoView {
    let title = event.title.clone();
    let when = format!("{} at {}", event.date, event.time);
    let location = event.location.clone();
    let attendees = format!("{} attendees", event.attendees);
    let badge = event_type_class(&event.kind);
    let kind = type_label(&event.kind);

    view! {
        <div class="entity-card clickable" on:click=move |_| selected.set(Some(event.clone()))>
            <div class="entity-card-header">
                <h4>{title}</h4>
                <span class=badge>{kind}</span>
            </div>
            <p class="muted">{when}</p>
            <p class="muted">{location}</p>
            <p class="entity-card-footer">{attendees}</p>
        </div>
    }
}

#[component]
fn EventDetail(
    event: Event,
    events: Collection<Event>,
    selected: RwSignal<Option<Event>>,
    form: RwSignal<Option<EventForm>>,
) -> impl IntoView {
    let close = Callback::new(move |_| selected.set(None));
    let id = event.key.record_id();
    let for_edit = event.clone();

    view! {
        <Modal title=event.title.clone() on_close=close>
            <div class="modal-body">
                <DetailRow label="Type" value=type_label(&event.kind)/>
                <DetailRow label="Date" value=event.date.clone()/>
                <DetailRow label="Time" value=event.time.clone()/>
                <DetailRow label="Location" value=event.location.clone()/>
                <DetailRow label="Attendees" value=event.attendees.to_string()/>
            </div>
            <div class="modal-actions">
                {id.map(|id| view! {
                    <button
                        type="button"
                        class="btn-danger"
                        on:click=move |_| events.delete(id.clone(), "event", move || selected.set(None))
                    >
                        "DELETE"
                    </button>
                })}
                <button
                    type="button"
                    class="btn-primary"
                    on:click=move |_| {
                        selected.set(None);
                        form.set(Some(EventForm::edit(&for_edit)));
                    }
                >
                    "EDIT"
                </button>
            </div>
        </Modal>
    }
}

#[component]
fn EventFormModal(state: EventForm, events: Collection<Event>, form: RwSignal<Option<EventForm>>) -> impl IntoView {
    let editing = state.is_edit();
    let id = state.id.clone();
    let draft = RwSignal::new(state.draft);
    let form_error = RwSignal::new(None::<String>);
    let close = Callback::new(move |_| form.set(None));
    let heading = if editing { "Edit Event" } else { "New Event" };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        if let Err(e) = current.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        let message = if editing { "Event updated" } else { "Event created" };
        events.persist(save_form::<Event>(id.clone(), current.form_fields(), None), form_error, move || {
            form.set(None);
            events.flash(message);
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
                        <label>"DATE"</label>
                        <input type="date" prop:value=move || draft.with(|d| d.date.clone()) on:input=bind(draft, |d, v| d.date = v) required/>
                    </div>
                    <div class="form-group">
                        <label>"TIME"</label>
                        <input type="time" prop:value=move || draft.with(|d| d.time.clone()) on:input=bind(draft, |d, v| d.time = v) required/>
                    </div>
                </div>
                <div class="form-group">
                    <label>"LOCATION"</label>
                    <input type="text" prop:value=move || draft.with(|d| d.location.clone()) on:input=bind(draft, |d, v| d.location = v) required/>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"TYPE"</label>
                        <select prop:value=move || draft.with(|d| d.kind.clone()) on:change=bind(draft, |d, v| d.kind = v)>
                            {EVENT_TYPES.iter().map(|(value, label)| view! { <option value=*value>{*label}</option> }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"ATTENDEES"</label>
                        <input
                            type="number"
                            min="0"
                            prop:value=move || draft.with(|d| d.attendees.to_string())
                            on:input=bind(draft, |d, v| d.attendees = v.trim().parse().unwrap_or(0))
                        />
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
