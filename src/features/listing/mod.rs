pub mod hooks;
pub mod services;

pub use hooks::*;
pub use services::*;
