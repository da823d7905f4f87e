pub mod app_navbar;
pub mod status_banner;

pub use app_navbar::{register_nav, AppNavbar, NavBuilder};
pub use status_banner::{report_error, report_info, StatusBanner, StatusMessage};
