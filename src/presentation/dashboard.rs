use futures::future::{AbortHandle, Abortable};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

use crate::application::{DashboardConfig, DashboardCoordinator, RebuildTicket};
use crate::domain::{
    errors::{DashboardError, DashboardResult},
    facts::{FactStore, Granularity, SegmentId},
    logging::LogComponent,
};
use crate::infrastructure::{CanvasSurface, DomMountPoints};
use crate::view_state::{DashboardSnapshot, Intent, snapshot};
use crate::{log_debug, log_info};

pub type BrowserCoordinator = DashboardCoordinator<DomMountPoints, CanvasSurface>;

/// Browser-side handle on the session. Cheap to clone into event handlers.
#[derive(Clone)]
pub struct Dashboard {
    coordinator: Rc<RefCell<BrowserCoordinator>>,
    pending_rebuild: Rc<RefCell<Option<AbortHandle>>>,
}

impl Dashboard {
    pub fn new(store: Arc<FactStore>, config: DashboardConfig) -> DashboardResult<Self> {
        let mounts = DomMountPoints::from_window()?;
        let surface = CanvasSurface::new(mounts.document().clone(), config.chart_width, config.chart_height);
        let coordinator = DashboardCoordinator::new(store, config, mounts, surface);
        Ok(Self {
            coordinator: Rc::new(RefCell::new(coordinator)),
            pending_rebuild: Rc::new(RefCell::new(None)),
        })
    }

    pub fn dispatch(&self, intent: Intent) {
        let ticket = self.coordinator.borrow_mut().dispatch(intent);
        if let Some(ticket) = ticket {
            self.schedule_rebuild(ticket);
        }
    }

    pub fn select_period(&self, value: &str) -> DashboardResult<()> {
        let granularity =
            Granularity::from_str(value).map_err(|_| DashboardError::InvalidPeriod(value.to_string()))?;
        self.dispatch(Intent::SelectGranularity(granularity));
        Ok(())
    }

    pub fn toggle_details(&self, value: &str) -> DashboardResult<()> {
        let segment = SegmentId::from_str(value).map_err(|_| DashboardError::UnknownSegment(value.to_string()))?;
        self.dispatch(Intent::ToggleDetails(segment));
        Ok(())
    }

    pub fn granularity(&self) -> Granularity {
        self.coordinator.borrow().state().granularity
    }

    pub fn store(&self) -> Arc<FactStore> {
        Arc::clone(self.coordinator.borrow().store())
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let coordinator = self.coordinator.borrow();
        snapshot(coordinator.store(), coordinator.state())
    }

    /// Aborts the previous pending rebuild and starts the delay for `ticket`.
    fn schedule_rebuild(&self, ticket: RebuildTicket) {
        if let Some(previous) = self.pending_rebuild.borrow_mut().take() {
            previous.abort();
            log_debug!(LogComponent::Presentation("Dashboard"), "pending rebuild aborted");
        }

        let (handle, registration) = AbortHandle::new_pair();
        *self.pending_rebuild.borrow_mut() = Some(handle);

        let delay = self.coordinator.borrow().config().rebuild_delay();
        let coordinator = Rc::clone(&self.coordinator);
        let pending = Rc::clone(&self.pending_rebuild);
        let rebuild = Abortable::new(
            async move {
                gloo_timers::future::sleep(delay).await;
                pending.borrow_mut().take();
                if coordinator.borrow_mut().run_rebuild(ticket) {
                    log_info!(
                        LogComponent::Presentation("Dashboard"),
                        "rebuild #{} done",
                        ticket.generation()
                    );
                }
            },
            registration,
        );
        wasm_bindgen_futures::spawn_local(async move {
            let _ = rebuild.await;
        });
    }
}
