//! Page-level views. Routing lives in the platform crate; each view here is
//! self-contained and talks to the backend through the session's client.

mod attendance;
mod dashboard;
mod home;
mod profile;
mod register;

pub use attendance::Attendance;
pub use dashboard::Dashboard;
pub use home::Home;
pub use profile::Profile;
pub use register::Register;
