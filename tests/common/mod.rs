#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use financial_dashboard_wasm::application::{ChartHandle, MountPoints, RenderingSurface};
use financial_dashboard_wasm::domain::chart::{ChartKind, ChartPayload, ChartType};
use financial_dashboard_wasm::domain::errors::{DashboardError, DashboardResult};
use financial_dashboard_wasm::view_state::MountId;

/// Page double: every mount point exists unless listed as missing.
#[derive(Default)]
pub struct InMemoryMountPoints {
    pub text: HashMap<MountId, String>,
    pub classes: HashMap<MountId, HashSet<String>>,
    pub missing: HashSet<MountId>,
}

impl InMemoryMountPoints {
    pub fn without(missing: impl IntoIterator<Item = MountId>) -> Self {
        Self { missing: missing.into_iter().collect(), ..Self::default() }
    }

    pub fn text_of(&self, target: MountId) -> Option<&str> {
        self.text.get(&target).map(String::as_str)
    }

    pub fn has_class(&self, target: MountId, class: &str) -> bool {
        self.classes.get(&target).is_some_and(|set| set.contains(class))
    }

    fn check(&self, target: &MountId) -> DashboardResult<()> {
        if self.missing.contains(target) {
            return Err(DashboardError::MissingMountPoint(target.selector()));
        }
        Ok(())
    }
}

impl MountPoints for InMemoryMountPoints {
    fn set_text(&mut self, target: &MountId, text: &str) -> DashboardResult<()> {
        self.check(target)?;
        self.text.insert(*target, text.to_string());
        Ok(())
    }

    fn set_class(&mut self, target: &MountId, class: &str, enabled: bool) -> DashboardResult<()> {
        self.check(target)?;
        let set = self.classes.entry(*target).or_default();
        if enabled {
            set.insert(class.to_string());
        } else {
            set.remove(class);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Created { id: usize, kind: ChartKind, chart_type: ChartType, payload: ChartPayload },
    Destroyed { id: usize },
}

/// Surface double that logs creations and destructions in order.
#[derive(Default)]
pub struct RecordingSurface {
    pub events: std::rc::Rc<std::cell::RefCell<Vec<SurfaceEvent>>>,
    pub missing: HashSet<ChartKind>,
    next_id: usize,
}

impl RecordingSurface {
    pub fn without(missing: impl IntoIterator<Item = ChartKind>) -> Self {
        Self { missing: missing.into_iter().collect(), ..Self::default() }
    }

    pub fn created(&self) -> Vec<(ChartKind, ChartPayload)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Created { kind, payload, .. } => Some((*kind, payload.clone())),
                SurfaceEvent::Destroyed { .. } => None,
            })
            .collect()
    }

    pub fn destroyed_count(&self) -> usize {
        self.events.borrow().iter().filter(|e| matches!(e, SurfaceEvent::Destroyed { .. })).count()
    }
}

pub struct RecordedChart {
    id: usize,
    events: std::rc::Rc<std::cell::RefCell<Vec<SurfaceEvent>>>,
    destroyed: bool,
}

impl ChartHandle for RecordedChart {
    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.events.borrow_mut().push(SurfaceEvent::Destroyed { id: self.id });
        }
    }
}

impl RenderingSurface for RecordingSurface {
    type Handle = RecordedChart;

    fn create(&mut self, mount: &MountId, chart_type: ChartType, payload: &ChartPayload) -> DashboardResult<RecordedChart> {
        let MountId::ChartCanvas(kind) = *mount else {
            return Err(DashboardError::RenderingSurfaceUnavailable(mount.selector()));
        };
        if self.missing.contains(&kind) {
            return Err(DashboardError::RenderingSurfaceUnavailable(mount.selector()));
        }
        self.next_id += 1;
        self.events.borrow_mut().push(SurfaceEvent::Created {
            id: self.next_id,
            kind,
            chart_type,
            payload: payload.clone(),
        });
        Ok(RecordedChart { id: self.next_id, events: std::rc::Rc::clone(&self.events), destroyed: false })
    }
}
