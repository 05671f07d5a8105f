pub mod auth;
pub mod dashboard;
pub mod screen;

pub use auth::AuthService;
pub use dashboard::{Dashboard, DashboardService, DashboardStats};
pub use screen::{Confirm, Notification, Screen, ScreenStatus, Severity};
