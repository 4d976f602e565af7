pub mod dashboard;
pub mod home;
pub mod nearby;

pub use dashboard::dashboard_page;
pub use home::home_page;
pub use nearby::nearby_page;
