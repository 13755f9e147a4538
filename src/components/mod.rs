pub mod confirm;
pub mod form;
pub mod layout;
pub mod list_controls;
pub mod modal;

pub use confirm::confirm;
pub use form::{bind, bind_checked, FormError};
pub use layout::AdminLayout;
pub use list_controls::{EmptyState, FilterSelect, ListHeader, Notices, SearchBar};
pub use modal::{DetailRow, Modal};
