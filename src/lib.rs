use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel, get_logger};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod view_state;

pub use application::{DashboardConfig, DashboardCoordinator, RebuildTicket};
pub use domain::errors::{DashboardError, DashboardResult};
pub use domain::facts::{FactStore, Granularity, SegmentId};
pub use presentation::{DashboardApi, mount_dashboard};
pub use view_state::{Intent, MountId, UiEffect, ViewState, handle_event};

/// Wires the panic hook and the console logger before anything else runs.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::ConsoleLogger::new(LogLevel::build_default()));
    domain::logging::init_logger(console_logger);
    domain::logging::init_time_provider(Box::new(infrastructure::BrowserTimeProvider));

    get_logger().info(LogComponent::Presentation("Initialize"), "financial dashboard ready");
}
