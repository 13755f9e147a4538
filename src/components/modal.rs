use leptos::html::Dialog;
use leptos::prelude::*;

/// A `<dialog>` opened with `show_modal()` as soon as it mounts. Callers
/// render it conditionally and drop it from the tree to close it.
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    #[prop(optional, into)] wide: bool,
    children: Children,
) -> impl IntoView {
    let dialog_ref: NodeRef<Dialog> = NodeRef::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        }
    });

    view! {
        <dialog
            node_ref=dialog_ref
            class="modal"
            class:modal-wide=wide
            on:cancel=move |ev: web_sys::Event| {
                // Escape: let the parent unmount us instead of the browser closing it
                ev.prevent_default();
                on_close.run(());
            }
        >
            <div class="modal-content">
                <div class="modal-header">
                    <h3>{title.to_uppercase()}</h3>
                    <button type="button" class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                {children()}
            </div>
        </dialog>
    }
}

#[component]
pub fn DetailRow(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}
