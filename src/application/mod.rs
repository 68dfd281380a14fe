//! Application layer: applies the dispatcher's effects to mount points and
//! chart slots, and owns the session.

pub mod binder;
pub mod chart_adapter;
pub mod config;
pub mod coordinator;

pub use binder::{MountPoints, ViewBinder};
pub use chart_adapter::{ChartAdapter, ChartHandle, ChartSlot, RenderingSurface};
pub use config::DashboardConfig;
pub use coordinator::{DashboardCoordinator, RebuildTicket};
