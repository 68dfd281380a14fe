use crate::domain::chart::{ChartKind, ChartPayload, ChartType, derive_chart_payload};
use crate::domain::errors::DashboardResult;
use crate::domain::facts::{FactStore, Granularity};
use crate::domain::logging::LogComponent;
use crate::view_state::MountId;
use crate::{log_debug, log_warn};

/// A live chart object owned by a slot.
pub trait ChartHandle {
    /// Releases the chart and its mount point. Must tolerate repeat calls.
    fn destroy(&mut self);
}

/// The external charting surface.
pub trait RenderingSurface {
    type Handle: ChartHandle;

    /// Fails with `RenderingSurfaceUnavailable` when `mount` is absent.
    fn create(&mut self, mount: &MountId, chart_type: ChartType, payload: &ChartPayload)
    -> DashboardResult<Self::Handle>;
}

#[derive(Debug)]
pub enum ChartSlot<H> {
    Absent,
    Mounted(H),
}

impl<H> ChartSlot<H> {
    pub fn is_mounted(&self) -> bool {
        matches!(self, ChartSlot::Mounted(_))
    }
}

/// Owns the three chart slots. There is no in-place update: a chart is
/// always destroyed and created anew.
pub struct ChartAdapter<S: RenderingSurface> {
    surface: S,
    slots: [ChartSlot<S::Handle>; 3],
}

impl<S: RenderingSurface> ChartAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, slots: [ChartSlot::Absent, ChartSlot::Absent, ChartSlot::Absent] }
    }

    pub fn slot(&self, kind: ChartKind) -> &ChartSlot<S::Handle> {
        &self.slots[kind.slot()]
    }

    pub fn is_mounted(&self, kind: ChartKind) -> bool {
        self.slot(kind).is_mounted()
    }

    pub fn mounted_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_mounted()).count()
    }

    /// Mounted → Absent. A no-op on an Absent slot; returns whether a chart was destroyed.
    pub fn destroy(&mut self, kind: ChartKind) -> bool {
        match std::mem::replace(&mut self.slots[kind.slot()], ChartSlot::Absent) {
            ChartSlot::Mounted(mut handle) => {
                handle.destroy();
                log_debug!(LogComponent::Application("ChartAdapter"), "destroyed {}", kind);
                true
            }
            ChartSlot::Absent => false,
        }
    }

    pub fn teardown(&mut self) {
        for kind in ChartKind::ALL {
            self.destroy(kind);
        }
    }

    /// Absent → Mounted. A chart already in the slot is destroyed first;
    /// on failure the slot stays Absent.
    pub fn mount(&mut self, kind: ChartKind, payload: &ChartPayload) -> DashboardResult<()> {
        self.destroy(kind);
        let handle = self.surface.create(&MountId::ChartCanvas(kind), payload.chart_type, payload)?;
        self.slots[kind.slot()] = ChartSlot::Mounted(handle);
        Ok(())
    }

    /// Builds all three charts for `granularity`. A chart whose surface is
    /// unavailable is skipped without affecting the others.
    pub fn rebuild(&mut self, store: &FactStore, granularity: Granularity) -> usize {
        for kind in ChartKind::ALL {
            let payload = derive_chart_payload(store, kind, granularity);
            if let Err(e) = self.mount(kind, &payload) {
                log_warn!(LogComponent::Application("ChartAdapter"), "{} skipped: {}", kind, e);
            }
        }
        self.mounted_count()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
