pub mod guard;
pub mod session;

pub use guard::{guard_step, GuardStep};
pub use session::{use_session, AuthState, Session};
