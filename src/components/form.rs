use leptos::prelude::*;
use wasm_bindgen::JsCast;

// Event handler writing an input's value into one field of a form draft
pub fn bind<T, E>(draft: RwSignal<T>, apply: fn(&mut T, String)) -> impl FnMut(E) + 'static
where
    T: Send + Sync + 'static,
    E: JsCast,
{
    move |ev: E| {
        let value = event_target_value(&ev);
        draft.update(|d| apply(d, value));
    }
}

pub fn bind_checked<T, E>(draft: RwSignal<T>, apply: fn(&mut T, bool)) -> impl FnMut(E) + 'static
where
    T: Send + Sync + 'static,
    E: JsCast,
{
    move |ev: E| {
        let checked = event_target_checked(ev.unchecked_ref::<web_sys::Event>());
        draft.update(|d| apply(d, checked));
    }
}

#[component]
pub fn FormError(error: RwSignal<Option<String>>) -> impl IntoView {
    move || error.get().map(|e| view! { <p class="form-error">{e}</p> })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Draft {
        title: String,
        featured: bool,
    }

    // Handlers are only built here; firing them needs a browser event
    #[test]
    fn helpers_accept_plain_dom_events() {
        let draft = RwSignal::new(Draft::default());
        let _on_input = bind::<Draft, web_sys::Event>(draft, |d, v| d.title = v);
        let _on_change = bind_checked::<Draft, web_sys::Event>(draft, |d, checked| d.featured = checked);
        draft.update(|d| {
            d.title.push('x');
            d.featured = true;
        });
        assert_eq!(draft.with_untracked(|d| (d.title.clone(), d.featured)), ("x".to_string(), true));
    }
}
