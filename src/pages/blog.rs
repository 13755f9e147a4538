use leptos::ev::SubmitEvent;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{bind, bind_checked, EmptyState, FilterSelect, FormError, ListHeader, Modal, Notices, SearchBar};
use crate::core::config::endpoint;
use crate::core::filter::{distinct_values, ListQuery};
use crate::core::models::record::action_path;
use crate::core::models::{display_date, Blog, BlogDraft, RecordId, Resource};
use crate::core::services::api;
use crate::features::listing::{empty_message, save_form, use_collection, Collection, EditState};

type BlogForm = EditState<BlogDraft>;

fn image_url(blog: &Blog) -> Option<String> {
    blog.image.as_ref()?;
    let id = blog.record_id()?;
    Some(endpoint(&action_path::<Blog>(&id, "image")))
}

// Flip isFeatured on the server; fall back to a local flip when the response
// does not carry the record
fn toggle_featured(blogs: Collection<Blog>, id: RecordId, current: bool) {
    spawn_local(async move {
        let payload = serde_json::json!({ "isFeatured": !current });
        match api::action::<Blog>(&id, "feature", "PUT", Some(payload)).await {
            Ok(body) => match api::decode_item::<Blog>(body) {
                Ok(blog) if blog.record_id().is_some() => blogs.saved(blog),
                _ => blogs.items.update(|items| {
                    if let Some(blog) = items.iter_mut().find(|b| b.record_id().as_ref() == Some(&id)) {
                        blog.is_featured = !current;
                    }
                }),
            },
            Err(e) => blogs.fail("Failed to update featured status", e),
        }
    });
}

#[component]
pub fn BlogPage() -> impl IntoView {
    let blogs = use_collection::<Blog>(ListQuery::default());
    let selected = RwSignal::new(None::<Blog>);
    let form = RwSignal::new(None::<BlogForm>);

    let tag_options = Signal::derive(move || {
        blogs.items.with(|items| {
            distinct_values(items, |b: &Blog| b.tags.clone())
                .into_iter()
                .map(|tag| (tag.clone(), tag))
                .collect::<Vec<_>>()
        })
    });
    let placeholder = Signal::derive(move || blogs.query.with(|q| empty_message("blog posts", q)));

    view! {
        <div class="page">
            <ListHeader
                title="Blog Posts"
                subtitle="Write, feature and manage articles"
                action="New Post"
                on_action=Callback::new(move |_| form.set(Some(BlogForm::create())))
            />
            <Notices error=blogs.error notice=blogs.notice/>
            <div class="list-controls">
                <SearchBar placeholder="Search by title or author..." query=blogs.query/>
                <FilterSelect query=blogs.query all_label="All Tags" options=tag_options/>
            </div>
            <Show when=move || !blogs.loading.get() fallback=|| view! { <div class="loading">"Loading posts..."</div> }>
                {move || {
                    let posts = blogs.visible();
                    if posts.is_empty() {
                        return view! { <EmptyState message=placeholder/> }.into_any();
                    }
                    view! {
                        <div class="card-grid">
                            {posts.into_iter().map(|blog| view! { <BlogCard blog=blog blogs=blogs selected=selected/> }).collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </Show>
            {move || selected.get().map(|blog| view! { <BlogDetail blog=blog blogs=blogs selected=selected form=form/> })}
            {move || form.get().map(|state| view! { <BlogFormModal state=state blogs=blogs form=form/> })}
        </div>
    }
}

#[component]
fn BlogCard(blog: Blog, blogs: Collection<Blog>, selected: RwSignal<Option<Blog>>) -> impl IntoView {
    let image = image_url(&blog);
    let title = blog.title.clone();
    let excerpt = blog.excerpt(140);
    let author = blog.author.email.clone();
    let date = display_date(&blog.created_at);
    let featured = blog.is_featured;
    let tags = blog.tags.clone();
    let id = blog.record_id();
    let feature_hint = if featured { "Unfeature" } else { "Feature" };

    view! {
        <div class="entity-card clickable" on:click=move |_| selected.set(Some(blog.clone()))>
            {image.map(|src| view! { <img class="card-image" src=src alt="cover"/> })}
            <div class="entity-card-header">
                <h4>{title}</h4>
                {id.map(|id| view! {
                    <button
                        type="button"
                        class="btn-icon"
                        class:featured=featured
                        title=feature_hint
                        on:click=move |ev| {
                            ev.stop_propagation();
                            toggle_featured(blogs, id.clone(), featured);
                        }
                    >
                        {if featured { "★" } else { "☆" }}
                    </button>
                })}
            </div>
            <p class="muted">{excerpt}</p>
            <div class="tag-list">
                {tags.into_iter().map(|t| view! { <span class="tag">{t}</span> }).collect_view()}
            </div>
            <p class="entity-card-footer">{format!("{} · {}", author, date)}</p>
        </div>
    }
}

#[component]
fn BlogDetail(
    blog: Blog,
    blogs: Collection<Blog>,
    selected: RwSignal<Option<Blog>>,
    form: RwSignal<Option<BlogForm>>,
) -> impl IntoView {
    let close = Callback::new(move |_| selected.set(None));
    let id = blog.record_id();
    let for_edit = blog.clone();
    let image = image_url(&blog);

    view! {
        <Modal title=blog.title.clone() on_close=close wide=true>
            <div class="modal-body">
                {image.map(|src| view! { <img class="detail-image" src=src alt="cover"/> })}
                <p class="muted">{format!("By {} on {}", blog.author.email, display_date(&blog.created_at))}</p>
                <div class="tag-list">
                    {blog.tags.iter().map(|t| view! { <span class="tag">{t.clone()}</span> }).collect_view()}
                </div>
                <div class="detail-description">{blog.content.clone()}</div>
            </div>
            <div class="modal-actions">
                {id.map(|id| view! {
                    <button
                        type="button"
                        class="btn-danger"
                        on:click=move |_| blogs.delete(id.clone(), "blog post", move || selected.set(None))
                    >
                        "DELETE"
                    </button>
                })}
                <button
                    type="button"
                    class="btn-primary"
                    on:click=move |_| {
                        selected.set(None);
                        form.set(Some(BlogForm::edit(&for_edit)));
                    }
                >
                    "EDIT"
                </button>
            </div>
        </Modal>
    }
}

#[component]
fn BlogFormModal(state: BlogForm, blogs: Collection<Blog>, form: RwSignal<Option<BlogForm>>) -> impl IntoView {
    let editing = state.is_edit();
    let id = state.id.clone();
    let draft = RwSignal::new(state.draft);
    let form_error = RwSignal::new(None::<String>);
    let image_ref: NodeRef<Input> = NodeRef::new();
    let close = Callback::new(move |_| form.set(None));
    let heading = if editing { "Edit Post" } else { "New Post" };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        if let Err(e) = current.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        let image = image_ref.get_untracked().and_then(|input| input.files()).and_then(|files| files.get(0));
        let message = if editing { "Post updated" } else { "Post published" };
        blogs.persist(save_form::<Blog>(id.clone(), current.form_fields(), image), form_error, move || {
            form.set(None);
            blogs.flash(message);
        });
    };

    view! {
        <Modal title=heading on_close=close wide=true>
            <form on:submit=handle_submit>
                <FormError error=form_error/>
                <div class="form-group">
                    <label>"TITLE"</label>
                    <input type="text" prop:value=move || draft.with(|d| d.title.clone()) on:input=bind(draft, |d, v| d.title = v) required/>
                </div>
                <div class="form-group">
                    <label>"CONTENT"</label>
                    <textarea rows="10" prop:value=move || draft.with(|d| d.content.clone()) on:input=bind(draft, |d, v| d.content = v)></textarea>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"TAGS"</label>
                        <input
                            type="text"
                            placeholder="design, rust, news"
                            prop:value=move || draft.with(|d| d.tags.clone())
                            on:input=bind(draft, |d, v| d.tags = v)
                        />
                    </div>
                    <div class="form-group">
                        <label>"COVER IMAGE"</label>
                        <input type="file" accept="image/*" node_ref=image_ref/>
                    </div>
                </div>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.is_featured)
                        on:change=bind_checked(draft, |d, checked| d.is_featured = checked)
                    />
                    "Featured post"
                </label>
                <div class="modal-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| close.run(())>"CANCEL"</button>
                    <button type="submit" class="btn-primary">{if editing { "SAVE CHANGES" } else { "PUBLISH" }}</button>
                </div>
            </form>
        </Modal>
    }
}
