pub mod column;
pub mod task_card;
pub mod task_modals;

pub use column::KanbanColumn;
pub use task_card::TaskCard;
pub use task_modals::{TaskDetailModal, TaskFormModal};
