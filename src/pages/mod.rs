pub mod blog;
pub mod contacts;
pub mod dashboard;
pub mod events;
pub mod login;
pub mod newsletters;
pub mod projects;
pub mod tasks;
pub mod team;

pub use blog::BlogPage;
pub use contacts::ContactsPage;
pub use dashboard::DashboardPage;
pub use events::EventsPage;
pub use login::LoginPage;
pub use newsletters::NewslettersPage;
pub use projects::ProjectsPage;
pub use tasks::TasksPage;
pub use team::TeamPage;
