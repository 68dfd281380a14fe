//! Browser entry points: Leptos markup, the session controller and the
//! JavaScript API.

pub mod app;
pub mod dashboard;
pub mod wasm_api;

pub use app::App;
pub use dashboard::Dashboard;
pub use wasm_api::{DashboardApi, mount_dashboard};
