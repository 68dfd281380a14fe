use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::logging::LogComponent;
use crate::view_state::{MountId, UiEffect};
use crate::{log_debug, log_warn};

/// Addressable insertion points of the page.
///
/// Implementations return [`DashboardError::MissingMountPoint`] when the
/// target is absent; the binder treats that as "skip".
pub trait MountPoints {
    fn set_text(&mut self, target: &MountId, text: &str) -> DashboardResult<()>;
    fn set_class(&mut self, target: &MountId, class: &str, enabled: bool) -> DashboardResult<()>;
}

/// Writes text and class effects into mount points.
pub struct ViewBinder<M: MountPoints> {
    mounts: M,
    skipped: usize,
}

impl<M: MountPoints> ViewBinder<M> {
    pub fn new(mounts: M) -> Self {
        Self { mounts, skipped: 0 }
    }

    /// Applies a text or class effect. Chart effects are not the binder's
    /// and are ignored. Returns whether the target received the write.
    pub fn apply(&mut self, effect: &UiEffect) -> bool {
        let result = match effect {
            UiEffect::SetText { target, text } => self.mounts.set_text(target, text),
            UiEffect::SetClass { target, class, enabled } => self.mounts.set_class(target, class, *enabled),
            UiEffect::TeardownCharts | UiEffect::CreateCharts | UiEffect::ScheduleChartRebuild => return false,
        };

        match result {
            Ok(()) => true,
            Err(DashboardError::MissingMountPoint(selector)) => {
                self.skipped += 1;
                log_debug!(LogComponent::Application("Binder"), "mount point {} not found (optional)", selector);
                false
            }
            Err(other) => {
                self.skipped += 1;
                log_warn!(LogComponent::Application("Binder"), "write skipped: {}", other);
                false
            }
        }
    }

    /// Writes that hit a missing or broken mount point so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn mounts(&self) -> &M {
        &self.mounts
    }
}
