use crate::core::models::{RecordId, Task, TaskStatus};

/// A position on the board as the user sees it: a column and an index into
/// the cards currently rendered in that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation {
    pub status: TaskStatus,
    pub index: usize,
}

impl DragLocation {
    pub fn new(status: TaskStatus, index: usize) -> Self {
        Self { status, index }
    }
}

/// Ordered task list backing the kanban board. Columns are never stored;
/// they are derived from each task's own status on every read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // Full reconciliation: the canonical list replaces local state wholesale
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    // Replace the task with the same identifier, or append it
    pub fn upsert(&mut self, task: Task) {
        let id = task.key.record_id();
        match self.tasks.iter().position(|t| id.is_some() && t.key.record_id() == id) {
            Some(index) => self.tasks[index] = task,
            None => self.tasks.push(task),
        }
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.key.record_id().as_ref() == Some(id))?;
        Some(self.tasks.remove(index))
    }

    pub fn column(&self, status: TaskStatus) -> Vec<Task> {
        self.column_where(status, |_| true)
    }

    pub fn column_where(&self, status: TaskStatus, visible: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == status && visible(*t))
            .cloned()
            .collect()
    }

    /// Drag-and-drop over the unfiltered board.
    pub fn on_drop(&mut self, source: DragLocation, dest: Option<DragLocation>) -> Option<PendingMove> {
        self.move_task(source, dest, |_| true)
    }

    /// Move a card between rendered positions while only the tasks accepted by
    /// `visible` are on screen. Indices refer to the visible cards; hidden
    /// tasks keep their place in the underlying list.
    ///
    /// Returns `None` without touching the list when there is no drop target,
    /// when the card is dropped where it started, or when the source index
    /// does not point at a card that can be persisted.
    pub fn move_task(
        &mut self,
        source: DragLocation,
        dest: Option<DragLocation>,
        visible: impl Fn(&Task) -> bool,
    ) -> Option<PendingMove> {
        let dest = dest?;
        if source == dest {
            return None;
        }

        let from_pos = *self.positions(source.status, &visible).get(source.index)?;
        let task_id = self.tasks[from_pos].key.record_id()?;

        let mut task = self.tasks.remove(from_pos);
        let from = task.status;
        task.status = dest.status;

        // Destination slice is measured after removal so same-column moves land
        // on the index the user dropped on
        let slice = self.positions(dest.status, &visible);
        let insert_at = match slice.get(dest.index) {
            Some(&pos) => pos,
            None => slice.last().map_or(self.tasks.len(), |&pos| pos + 1),
        };

        // Same column and same rendered rank: nothing moved, put it back
        let rank = slice.iter().take_while(|&&pos| pos < insert_at).count();
        if from == dest.status && rank == source.index {
            task.status = from;
            self.tasks.insert(from_pos, task);
            return None;
        }
        self.tasks.insert(insert_at, task);

        Some(PendingMove { task_id, from, to: dest.status })
    }

    fn positions(&self, status: TaskStatus, visible: &impl Fn(&Task) -> bool) -> Vec<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.status == status && visible(*t))
            .map(|(i, _)| i)
            .collect()
    }
}

/// A move that has been applied locally but not yet confirmed by the store.
/// Settling consumes it, so a move is either committed or reverted, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub task_id: RecordId,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Committed,
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledMove {
    pub task_id: RecordId,
    pub outcome: MoveOutcome,
}

impl PendingMove {
    // Body of the persistence call: only the changed field
    pub fn status_patch(&self) -> serde_json::Value {
        serde_json::json!({ "status": self.to.as_str() })
    }

    pub fn commit(self) -> SettledMove {
        SettledMove { task_id: self.task_id, outcome: MoveOutcome::Committed }
    }

    // Discard the optimistic state in favour of the reloaded canonical list
    pub fn revert(self, board: &mut TaskBoard, canonical: Vec<Task>) -> SettledMove {
        board.replace(canonical);
        SettledMove { task_id: self.task_id, outcome: MoveOutcome::Reverted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Priority, RecordKey};

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            key: RecordKey { object_id: Some(id.to_string()), id: None },
            title: format!("Task {}", id),
            project: "Portal".into(),
            assignee: "Sam".into(),
            priority: Priority::Medium,
            status,
            due_date: "2024-07-01".into(),
            description: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(|t| t.key.record_id().unwrap().to_string()).collect()
    }

    fn assert_columns_match_status(board: &TaskBoard) {
        let columns: Vec<_> = TaskStatus::all().into_iter().map(|s| (s, board.column(s))).collect();
        for (status, column) in &columns {
            assert!(column.iter().all(|t| t.status == *status));
        }
        let total: usize = columns.iter().map(|(_, c)| c.len()).sum();
        assert_eq!(total, board.tasks().len());
    }

    #[test]
    fn dragging_into_another_column_updates_status_and_order() {
        let mut board = TaskBoard::new(vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::InProgress),
        ]);

        let pending = board
            .on_drop(
                DragLocation::new(TaskStatus::Todo, 0),
                Some(DragLocation::new(TaskStatus::InProgress, 0)),
            )
            .expect("move should be applied");

        assert!(board.column(TaskStatus::Todo).is_empty());
        assert_eq!(ids(&board.column(TaskStatus::InProgress)), vec!["A", "B"]);
        assert_eq!(pending.task_id, RecordId::Text("A".into()));
        assert_eq!(pending.from, TaskStatus::Todo);
        assert_eq!(pending.status_patch(), serde_json::json!({ "status": "in-progress" }));
        assert_columns_match_status(&board);
    }

    #[test]
    fn failed_persistence_reverts_to_reloaded_list() {
        let mut board = TaskBoard::new(vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::InProgress),
        ]);
        let pending = board
            .on_drop(
                DragLocation::new(TaskStatus::Todo, 0),
                Some(DragLocation::new(TaskStatus::InProgress, 0)),
            )
            .unwrap();

        let reloaded = vec![task("A", TaskStatus::Todo), task("B", TaskStatus::InProgress)];
        let settled = pending.revert(&mut board, reloaded.clone());

        assert_eq!(settled.outcome, MoveOutcome::Reverted);
        assert_eq!(board.tasks(), reloaded.as_slice());
        assert_eq!(ids(&board.column(TaskStatus::Todo)), vec!["A"]);
        assert_eq!(ids(&board.column(TaskStatus::InProgress)), vec!["B"]);
    }

    #[test]
    fn revert_takes_whatever_the_store_returns() {
        let mut board = TaskBoard::new(vec![task("A", TaskStatus::Todo)]);
        let pending = board
            .on_drop(
                DragLocation::new(TaskStatus::Todo, 0),
                Some(DragLocation::new(TaskStatus::Completed, 0)),
            )
            .unwrap();

        // The store has moved on meanwhile: nothing of the optimistic edit survives
        let canonical = vec![task("A", TaskStatus::Review), task("C", TaskStatus::Todo)];
        pending.revert(&mut board, canonical.clone());
        assert_eq!(board.tasks(), canonical.as_slice());
    }

    #[test]
    fn commit_leaves_optimistic_state_in_place() {
        let mut board = TaskBoard::new(vec![task("A", TaskStatus::Review)]);
        let pending = board
            .on_drop(
                DragLocation::new(TaskStatus::Review, 0),
                Some(DragLocation::new(TaskStatus::Completed, 3)),
            )
            .unwrap();
        let before = board.clone();
        assert_eq!(pending.commit().outcome, MoveOutcome::Committed);
        assert_eq!(board, before);
        assert_eq!(board.tasks()[0].status, TaskStatus::Completed);
    }

    #[test]
    fn dropping_in_place_or_outside_is_a_no_op() {
        let mut board = TaskBoard::new(vec![task("A", TaskStatus::Todo), task("B", TaskStatus::Todo)]);
        let before = board.clone();

        let here = DragLocation::new(TaskStatus::Todo, 1);
        assert_eq!(board.on_drop(here, Some(here)), None);
        assert_eq!(board.on_drop(here, None), None);
        assert_eq!(board, before);
    }

    #[test]
    fn dropping_after_the_last_card_of_its_own_column_is_a_no_op() {
        // Empty space below the column reports index == rendered length
        let mut board = TaskBoard::new(vec![task("A", TaskStatus::Todo)]);
        let before = board.clone();
        let moved = board.on_drop(
            DragLocation::new(TaskStatus::Todo, 0),
            Some(DragLocation::new(TaskStatus::Todo, 1)),
        );
        assert_eq!(moved, None);
        assert_eq!(board, before);

        let mut board = TaskBoard::new(vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Review),
            task("C", TaskStatus::Todo),
        ]);
        let before = board.clone();
        let moved = board.on_drop(
            DragLocation::new(TaskStatus::Todo, 1),
            Some(DragLocation::new(TaskStatus::Todo, 2)),
        );
        assert_eq!(moved, None);
        assert_eq!(ids(board.tasks()), vec!["A", "B", "C"]);
        assert_eq!(board, before);
    }

    #[test]
    fn hidden_tasks_do_not_turn_a_no_op_into_a_move() {
        let mut board = TaskBoard::new(vec![
            task("A", TaskStatus::Todo),
            task("hidden", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
        ]);
        let before = board.clone();
        let visible = |t: &Task| !t.title.contains("hidden");
        let moved = board.move_task(
            DragLocation::new(TaskStatus::Todo, 1),
            Some(DragLocation::new(TaskStatus::Todo, 2)),
            visible,
        );
        assert_eq!(moved, None);
        assert_eq!(board, before);
    }

    #[test]
    fn stale_source_index_is_ignored() {
        let mut board = TaskBoard::new(vec![task("A", TaskStatus::Todo)]);
        let before = board.clone();
        let result = board.on_drop(
            DragLocation::new(TaskStatus::Todo, 4),
            Some(DragLocation::new(TaskStatus::Review, 0)),
        );
        assert_eq!(result, None);
        assert_eq!(board, before);
    }

    #[test]
    fn tasks_without_identifier_cannot_move() {
        let mut unsaved = task("X", TaskStatus::Todo);
        unsaved.key = RecordKey::default();
        let mut board = TaskBoard::new(vec![unsaved]);
        let before = board.clone();
        assert_eq!(
            board.on_drop(
                DragLocation::new(TaskStatus::Todo, 0),
                Some(DragLocation::new(TaskStatus::Review, 0)),
            ),
            None
        );
        assert_eq!(board, before);
    }

    #[test]
    fn reorders_within_a_column() {
        let mut board = TaskBoard::new(vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Todo),
        ]);

        board.on_drop(
            DragLocation::new(TaskStatus::Todo, 0),
            Some(DragLocation::new(TaskStatus::Todo, 2)),
        );
        assert_eq!(ids(&board.column(TaskStatus::Todo)), vec!["B", "C", "A"]);

        board.on_drop(
            DragLocation::new(TaskStatus::Todo, 2),
            Some(DragLocation::new(TaskStatus::Todo, 0)),
        );
        assert_eq!(ids(&board.column(TaskStatus::Todo)), vec!["A", "B", "C"]);
    }

    #[test]
    fn index_past_the_end_appends_after_the_column() {
        let mut board = TaskBoard::new(vec![
            task("A", TaskStatus::Review),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Review),
            task("D", TaskStatus::Completed),
        ]);

        board.on_drop(
            DragLocation::new(TaskStatus::Todo, 0),
            Some(DragLocation::new(TaskStatus::Review, 10)),
        );
        assert_eq!(ids(board.tasks()), vec!["A", "C", "B", "D"]);
        assert_eq!(ids(&board.column(TaskStatus::Review)), vec!["A", "C", "B"]);

        // Empty destination column: the task goes to the end of the list
        board.on_drop(
            DragLocation::new(TaskStatus::Review, 0),
            Some(DragLocation::new(TaskStatus::InProgress, 0)),
        );
        assert_eq!(ids(board.tasks()), vec!["C", "B", "D", "A"]);
        assert_columns_match_status(&board);
    }

    #[test]
    fn filtered_indices_map_back_to_the_full_list() {
        let mut board = TaskBoard::new(vec![
            task("A", TaskStatus::Todo),
            task("hidden", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Review),
        ]);
        let visible = |t: &Task| !t.title.contains("hidden");

        // Visible todo column is [A, B]; dragging B (index 1) to review[0]
        let pending = board
            .move_task(
                DragLocation::new(TaskStatus::Todo, 1),
                Some(DragLocation::new(TaskStatus::Review, 0)),
                visible,
            )
            .unwrap();

        assert_eq!(pending.task_id, RecordId::Text("B".into()));
        assert_eq!(ids(board.tasks()), vec!["A", "hidden", "B", "C"]);
        assert_eq!(ids(&board.column(TaskStatus::Todo)), vec!["A", "hidden"]);
        assert_eq!(ids(&board.column(TaskStatus::Review)), vec!["B", "C"]);
    }

    #[test]
    fn every_drop_keeps_columns_consistent() {
        let statuses = TaskStatus::all();
        let mut board = TaskBoard::new(
            (0..8)
                .map(|i| task(&format!("T{}", i), statuses[i % statuses.len()]))
                .collect(),
        );

        for step in 0..40usize {
            let source = DragLocation::new(statuses[step % 4], step % 3);
            let dest = DragLocation::new(statuses[(step * 7 + 1) % 4], step % 5);
            let moved = board.on_drop(source, Some(dest));
            if let Some(pending) = moved {
                let task = board
                    .tasks()
                    .iter()
                    .find(|t| t.key.record_id().as_ref() == Some(&pending.task_id))
                    .unwrap();
                assert_eq!(task.status, dest.status);
            }
            assert_columns_match_status(&board);
            assert_eq!(board.tasks().len(), 8);
        }
    }

    #[test]
    fn upsert_and_remove_by_identifier() {
        let mut board = TaskBoard::new(vec![task("A", TaskStatus::Todo)]);
        let mut edited = task("A", TaskStatus::Review);
        edited.title = "Renamed".into();
        board.upsert(edited);
        board.upsert(task("B", TaskStatus::Todo));
        assert_eq!(board.tasks().len(), 2);
        assert_eq!(board.tasks()[0].title, "Renamed");

        let removed = board.remove(&RecordId::Text("A".into())).unwrap();
        assert_eq!(removed.status, TaskStatus::Review);
        assert_eq!(ids(board.tasks()), vec!["B"]);
        assert!(board.remove(&RecordId::Text("zzz".into())).is_none());
    }
}
