use std::sync::Arc;

use super::binder::{MountPoints, ViewBinder};
use super::chart_adapter::{ChartAdapter, RenderingSurface};
use super::config::DashboardConfig;
use crate::domain::facts::FactStore;
use crate::domain::logging::LogComponent;
use crate::view_state::{Intent, UiEffect, ViewState, handle_event};
use crate::{log_debug, log_info};

/// Claim on a delayed chart rebuild. Only the most recently issued ticket
/// is honoured; issuing a new one cancels the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildTicket(u64);

impl RebuildTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Single owner of the session: view state, mount points and chart slots.
pub struct DashboardCoordinator<M: MountPoints, S: RenderingSurface> {
    store: Arc<FactStore>,
    config: DashboardConfig,
    state: ViewState,
    binder: ViewBinder<M>,
    charts: ChartAdapter<S>,
    generation: u64,
    pending: Option<u64>,
}

impl<M: MountPoints, S: RenderingSurface> DashboardCoordinator<M, S> {
    pub fn new(store: Arc<FactStore>, config: DashboardConfig, mounts: M, surface: S) -> Self {
        log_debug!(
            LogComponent::Application("Coordinator"),
            "creating coordinator for {} ({})",
            store.company().name,
            config.initial_period
        );
        Self {
            state: ViewState::new(config.initial_period),
            store,
            config,
            binder: ViewBinder::new(mounts),
            charts: ChartAdapter::new(surface),
            generation: 0,
            pending: None,
        }
    }

    /// Runs `intent` through the dispatcher and applies its effects.
    /// Returns a ticket when the charts must be rebuilt after the
    /// configured delay; see [`Self::run_rebuild`].
    pub fn dispatch(&mut self, intent: Intent) -> Option<RebuildTicket> {
        let (next, effects) = handle_event(&self.store, &self.state, intent);
        self.state = next;
        log_debug!(
            LogComponent::Application("Coordinator"),
            "{:?} -> {} effects",
            intent,
            effects.len()
        );

        let mut ticket = None;
        for effect in &effects {
            match effect {
                UiEffect::SetText { .. } | UiEffect::SetClass { .. } => {
                    self.binder.apply(effect);
                }
                UiEffect::TeardownCharts => self.charts.teardown(),
                UiEffect::CreateCharts => {
                    self.pending = None;
                    self.charts.rebuild(&self.store, self.state.granularity);
                }
                UiEffect::ScheduleChartRebuild => {
                    self.generation += 1;
                    self.pending = Some(self.generation);
                    ticket = Some(RebuildTicket(self.generation));
                }
            }
        }
        ticket
    }

    /// Rebuilds the charts for the granularity current *now*. A superseded
    /// ticket does nothing and returns `false`.
    pub fn run_rebuild(&mut self, ticket: RebuildTicket) -> bool {
        if self.pending != Some(ticket.0) {
            log_debug!(
                LogComponent::Application("Coordinator"),
                "stale rebuild #{} ignored",
                ticket.0
            );
            return false;
        }
        self.pending = None;
        self.charts.teardown();
        let mounted = self.charts.rebuild(&self.store, self.state.granularity);
        log_info!(
            LogComponent::Application("Coordinator"),
            "charts rebuilt for {} ({} of 3 mounted)",
            self.state.granularity,
            mounted
        );
        true
    }

    pub fn has_pending_rebuild(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &Arc<FactStore> {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn binder(&self) -> &ViewBinder<M> {
        &self.binder
    }

    pub fn charts(&self) -> &ChartAdapter<S> {
        &self.charts
    }
}
