use leptos::prelude::*;

use crate::core::filter::{ListQuery, ALL};

#[component]
pub fn ListHeader(
    #[prop(into)] title: String,
    #[prop(into)] subtitle: String,
    #[prop(optional, into)] action: Option<String>,
    #[prop(optional)] on_action: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div>
                <h2>{title}</h2>
                <p class="page-subtitle">{subtitle}</p>
            </div>
            {action.zip(on_action).map(|(label, on_action)| view! {
                <button class="btn-primary" on:click=move |_| on_action.run(())>{label}</button>
            })}
        </div>
    }
}

#[component]
pub fn SearchBar(#[prop(into)] placeholder: String, query: RwSignal<ListQuery>) -> impl IntoView {
    view! {
        <input
            type="search"
            class="search-input"
            placeholder=placeholder
            prop:value=move || query.with(|q| q.search.clone())
            on:input=move |ev| {
                let search = event_target_value(&ev);
                query.update(|q| q.search = search);
            }
        />
    }
}

/// Select filter whose first option means "no restriction". `options` are
/// (value, label) pairs and may be derived from the loaded records.
#[component]
pub fn FilterSelect(
    query: RwSignal<ListQuery>,
    #[prop(into)] all_label: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <select
            class="filter-select"
            prop:value=move || query.with(|q| q.selection.clone())
            on:change=move |ev| {
                let selection = event_target_value(&ev);
                query.update(|q| q.selection = selection);
            }
        >
            <option value=ALL>{all_label}</option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|(value, label)| view! { <option value=value>{label}</option> })
                    .collect_view()
            }}
        </select>
    }
}

#[component]
pub fn Notices(error: RwSignal<Option<String>>, #[prop(optional)] notice: Option<RwSignal<Option<String>>>) -> impl IntoView {
    view! {
        {move || error.get().map(|message| view! {
            <div class="alert alert-error">
                <span>{message}</span>
                <button type="button" class="alert-dismiss" on:click=move |_| error.set(None)>"×"</button>
            </div>
        })}
        {move || notice.and_then(|n| n.get()).map(|message| view! {
            <div class="alert alert-success">{message}</div>
        })}
    }
}

#[component]
pub fn EmptyState(#[prop(into)] message: Signal<String>) -> impl IntoView {
    view! { <div class="empty-state">{move || message.get()}</div> }
}
