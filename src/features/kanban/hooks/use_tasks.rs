use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::confirm;
use crate::core::filter::ListQuery;
use crate::core::models::{RecordId, Task, TaskDraft, TaskStatus};
use crate::features::auth::use_session;
use crate::features::kanban::board::{DragLocation, TaskBoard};
use crate::features::kanban::services::{delete_task, drop_task, load_board, save_task};
use crate::features::listing::EditState;

pub type TaskForm = EditState<TaskDraft>;

#[derive(Clone, Copy)]
pub struct TasksHook {
    pub board: RwSignal<TaskBoard>,
    pub query: RwSignal<ListQuery>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub selected: RwSignal<Option<Task>>,
    pub form: RwSignal<Option<TaskForm>>,
    pub form_error: RwSignal<Option<String>>,
    pub drop: Callback<(DragLocation, Option<DragLocation>)>,
    pub save: Callback<TaskForm>,
    pub delete: Callback<RecordId>,
}

pub fn use_tasks() -> TasksHook {
    let session = use_session();
    let board = RwSignal::new(TaskBoard::default());
    let query = RwSignal::new(ListQuery::default());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let selected = RwSignal::new(None::<Task>);
    let form = RwSignal::new(None::<TaskForm>);
    let form_error = RwSignal::new(None::<String>);

    load_board(board, loading, session, error);

    let drop = Callback::new(move |(source, dest): (DragLocation, Option<DragLocation>)| {
        drop_task(board, query.get_untracked(), source, dest, session, error);
    });

    let save = Callback::new(move |submitted: TaskForm| {
        if let Err(e) = submitted.draft.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        form_error.set(None);
        spawn_local(async move {
            match save_task(submitted.id.clone(), &submitted.draft).await {
                Ok(task) => {
                    board.update(|b| b.upsert(task));
                    form.set(None);
                }
                Err(e) => session.report("Failed to save task", e, form_error),
            }
        });
    });

    let delete = Callback::new(move |id: RecordId| {
        if !confirm("Are you sure you want to delete this task?") {
            return;
        }
        spawn_local(async move {
            match delete_task(&id).await {
                Ok(()) => {
                    board.update(|b| {
                        b.remove(&id);
                    });
                    selected.set(None);
                }
                Err(e) => session.report("Failed to delete task", e, error),
            }
        });
    });

    TasksHook { board, query, loading, error, selected, form, form_error, drop, save, delete }
}

impl TasksHook {
    pub fn column(&self, status: TaskStatus) -> Vec<Task> {
        self.query.with(|q| self.board.with(|b| b.column_where(status, |t| q.matches(t))))
    }

    pub fn open_create(&self) {
        self.form_error.set(None);
        self.form.set(Some(TaskForm::create()));
    }

    pub fn open_edit(&self, task: &Task) {
        self.form_error.set(None);
        self.selected.set(None);
        self.form.set(Some(TaskForm::edit(task)));
    }
}
