use web_sys::{Document, Element};

use crate::application::binder::MountPoints;
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::view_state::MountId;

/// Mount points backed by the live document, resolved per write so markup
/// added after startup is picked up.
#[derive(Clone)]
pub struct DomMountPoints {
    document: Document,
}

impl DomMountPoints {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> DashboardResult<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| DashboardError::MissingMountPoint("document".to_string()))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn resolve(&self, target: &MountId) -> DashboardResult<Element> {
        let selector = target.selector();
        match self.document.query_selector(&selector) {
            Ok(Some(element)) => Ok(element),
            _ => Err(DashboardError::MissingMountPoint(selector)),
        }
    }
}

impl MountPoints for DomMountPoints {
    fn set_text(&mut self, target: &MountId, text: &str) -> DashboardResult<()> {
        self.resolve(target)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_class(&mut self, target: &MountId, class: &str, enabled: bool) -> DashboardResult<()> {
        self.resolve(target)?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(|_| DashboardError::MissingMountPoint(format!("{} (class list)", target.selector())))
    }
}
