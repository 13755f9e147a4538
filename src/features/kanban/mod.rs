pub mod board;
pub mod components;
pub mod hooks;
pub mod services;

pub use board::{DragLocation, MoveOutcome, PendingMove, SettledMove, TaskBoard};
pub use components::*;
pub use hooks::*;
