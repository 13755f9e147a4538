use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::error::ApiError;
use crate::core::filter::ListQuery;
use crate::core::models::{RecordId, Task, TaskDraft};
use crate::core::services::api;
use crate::features::auth::Session;
use crate::features::kanban::board::{DragLocation, MoveOutcome, PendingMove, TaskBoard};
use crate::features::listing::services::save_json;

// Load (or reload) the whole board from the store
pub fn load_board(board: RwSignal<TaskBoard>, loading: RwSignal<bool>, session: Session, error: RwSignal<Option<String>>) {
    loading.set(true);
    spawn_local(async move {
        match api::list::<Task>().await {
            Ok(tasks) => {
                web_sys::console::log_1(&format!("Loaded {} tasks", tasks.len()).into());
                board.update(|b| b.replace(tasks));
                error.set(None);
            }
            Err(e) => session.report("Failed to load tasks", e, error),
        }
        loading.set(false);
    });
}

/// Apply a drop to the board optimistically and, when it changed anything,
/// send the new status to the store.
pub fn drop_task(
    board: RwSignal<TaskBoard>,
    query: ListQuery,
    source: DragLocation,
    dest: Option<DragLocation>,
    session: Session,
    error: RwSignal<Option<String>>,
) {
    let pending = board
        .try_update_untracked(|b| b.move_task(source, dest, |t| query.matches(t)))
        .flatten();

    let Some(pending) = pending else {
        return;
    };
    board.notify();

    web_sys::console::log_1(
        &format!("Moving task {} from {} to {}", pending.task_id, pending.from.as_str(), pending.to.as_str()).into(),
    );
    persist_move(board, pending, session, error);
}

// PUT the status; on failure the board is rebuilt from a fresh list
fn persist_move(board: RwSignal<TaskBoard>, pending: PendingMove, session: Session, error: RwSignal<Option<String>>) {
    spawn_local(async move {
        let settled = match api::update_json::<Task>(&pending.task_id, pending.status_patch()).await {
            Ok(_) => pending.commit(),
            Err(e) => {
                if e.is_unauthorized() {
                    session.invalidate();
                    return;
                }
                session.report("Failed to update task status", e, error);

                match api::list::<Task>().await {
                    Ok(canonical) => match board.try_update(|b| pending.revert(b, canonical)) {
                        Some(settled) => settled,
                        None => return,
                    },
                    Err(reload_err) => {
                        // Keep the optimistic list; columns still follow each task's status
                        web_sys::console::error_1(&format!("Failed to reload tasks: {}", reload_err).into());
                        return;
                    }
                }
            }
        };

        match settled.outcome {
            MoveOutcome::Committed => web_sys::console::log_1(&format!("Task {} status saved", settled.task_id).into()),
            MoveOutcome::Reverted => web_sys::console::log_1(&format!("Task {} move reverted", settled.task_id).into()),
        }
    });
}

pub async fn save_task(id: Option<RecordId>, draft: &TaskDraft) -> Result<Task, ApiError> {
    draft.validate()?;
    save_json::<Task>(id, draft.to_payload()).await
}

pub async fn delete_task(id: &RecordId) -> Result<(), ApiError> {
    api::remove::<Task>(id).await
}
