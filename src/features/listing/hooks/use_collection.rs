use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::confirm;
use crate::core::error::ApiError;
use crate::core::filter::{ListQuery, Searchable};
use crate::core::models::{RecordId, Resource};
use crate::core::services::api;
use crate::features::auth::{use_session, Session};
use crate::features::listing::services::{drop_record, merge_saved};

const NOTICE_MS: u32 = 3_000;

/// Create/edit modal state; `id` is None while creating.
#[derive(Debug, Clone, PartialEq)]
pub struct EditState<D> {
    pub id: Option<RecordId>,
    pub draft: D,
}

impl<D: Default> EditState<D> {
    pub fn create() -> Self {
        Self { id: None, draft: D::default() }
    }
}

impl<D> EditState<D> {
    pub fn edit<R: Resource>(record: &R) -> Self
    where
        D: for<'a> From<&'a R>,
    {
        Self { id: record.record_id(), draft: D::from(record) }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

/// Reactive state behind one list screen: the loaded records, the current
/// search/filter and the inline error and notice lines.
pub struct Collection<R: Resource> {
    pub items: RwSignal<Vec<R>>,
    pub query: RwSignal<ListQuery>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    session: Session,
}

impl<R: Resource> Clone for Collection<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for Collection<R> {}

pub fn use_collection<R: Resource>(initial: ListQuery) -> Collection<R> {
    let collection = Collection {
        items: RwSignal::new(Vec::new()),
        query: RwSignal::new(initial),
        loading: RwSignal::new(true),
        error: RwSignal::new(None),
        notice: RwSignal::new(None),
        session: use_session(),
    };
    collection.reload();
    collection
}

impl<R: Resource> Collection<R> {
    pub fn reload(&self) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::list::<R>().await {
                Ok(records) => {
                    this.items.set(records);
                    this.error.set(None);
                }
                Err(e) => this.fail(&format!("Failed to load {}", R::LIST_KEY), e),
            }
            this.loading.set(false);
        });
    }

    pub fn set_search(&self, search: String) {
        self.query.update(|q| q.search = search);
    }

    pub fn set_selection(&self, selection: String) {
        self.query.update(|q| q.selection = selection);
    }

    pub fn saved(&self, record: R) {
        self.items.update(|items| {
            merge_saved(items, record);
        });
    }

    pub fn removed(&self, id: &RecordId) {
        self.items.update(|items| {
            drop_record(items, id);
        });
    }

    pub fn find(&self, id: &RecordId) -> Option<R> {
        self.items.with_untracked(|items| {
            items.iter().find(|r| r.record_id().as_ref() == Some(id)).cloned()
        })
    }

    pub fn fail(&self, context: &str, err: ApiError) {
        self.session.report(context, err, self.error);
    }

    // Same as `fail` but the message lands in a modal's own error line
    pub fn report(&self, context: &str, err: ApiError, inline: RwSignal<Option<String>>) {
        self.session.report(context, err, inline);
    }

    /// Run a create/update request and fold the returned record into the list.
    pub fn persist<F>(&self, request: F, form_error: RwSignal<Option<String>>, done: impl FnOnce() + 'static)
    where
        F: Future<Output = Result<R, ApiError>> + 'static,
    {
        let this = *self;
        spawn_local(async move {
            match request.await {
                Ok(record) => {
                    this.saved(record);
                    form_error.set(None);
                    done();
                }
                Err(e) => this.report("Failed to save", e, form_error),
            }
        });
    }

    /// Confirm, DELETE, then splice the record out of the local list.
    pub fn delete(&self, id: RecordId, noun: &'static str, done: impl FnOnce() + 'static) {
        if !confirm(&format!("Are you sure you want to delete this {}?", noun)) {
            return;
        }
        let this = *self;
        spawn_local(async move {
            match api::remove::<R>(&id).await {
                Ok(()) => {
                    this.removed(&id);
                    done();
                    this.flash(format!("Deleted {}", noun));
                }
                Err(e) => this.fail(&format!("Failed to delete {}", noun), e),
            }
        });
    }

    // Short-lived confirmation line under the header
    pub fn flash(&self, message: impl Into<String>) {
        let notice = self.notice;
        let message = message.into();
        notice.set(Some(message.clone()));
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_MS).await;
            if notice.get_untracked().as_deref() == Some(message.as_str()) {
                notice.set(None);
            }
        });
    }

    pub fn total(&self) -> usize {
        self.items.with(Vec::len)
    }
}

impl<R: Resource + Searchable> Collection<R> {
    pub fn visible(&self) -> Vec<R> {
        self.query.with(|q| self.items.with(|items| q.apply(items)))
    }
}
