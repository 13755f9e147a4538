pub mod auth;
pub mod kanban;
pub mod listing;
