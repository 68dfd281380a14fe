use gloo::events::EventListener;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::app::App;
use super::dashboard::Dashboard;
use crate::application::DashboardConfig;
use crate::domain::{
    errors::{DashboardError, DashboardResult},
    facts::{FactStore, SegmentId},
    logging::{LogComponent, get_logger},
};
use crate::view_state::{Intent, MountId};
use crate::{log_error, log_info, log_warn};

/// JavaScript handle on one dashboard session.
///
/// Either created by [`mount_dashboard`], which renders the markup itself,
/// or with `new DashboardApi(config)` followed by `attach()` on a page that
/// already carries the markup.
#[wasm_bindgen]
pub struct DashboardApi {
    dashboard: Dashboard,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl DashboardApi {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DashboardApi, JsValue> {
        Ok(Self::build(FactStore::builtin(), config_json.as_deref())?)
    }

    /// Same as the constructor but with caller-supplied figures.
    #[wasm_bindgen(js_name = withFacts)]
    pub fn with_facts(facts_json: &str, config_json: Option<String>) -> Result<DashboardApi, JsValue> {
        let store = FactStore::from_json(facts_json).map_err(|e| {
            log_error!(LogComponent::Presentation("DashboardApi"), "rejected figures: {}", e);
            e
        })?;
        Ok(Self::build(Arc::new(store), config_json.as_deref())?)
    }

    /// Binds click listeners to the period toggles and expand buttons
    /// already in the document, then renders the initial view.
    pub fn attach(&mut self) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DashboardError::MissingMountPoint("document".to_string()))?;

        self.listeners.clear();

        for button in elements(&document, ".toggle-btn")? {
            let Some(period) = button.get_attribute("data-period") else {
                log_warn!(LogComponent::Presentation("DashboardApi"), "toggle without data-period skipped");
                continue;
            };
            let dashboard = self.dashboard.clone();
            self.listeners.push(EventListener::new(&button, "click", move |event| {
                event.prevent_default();
                if let Err(e) = dashboard.select_period(&period) {
                    log_warn!(LogComponent::Presentation("DashboardApi"), "{}", e);
                }
            }));
        }

        for (position, button) in elements(&document, ".expand-btn")?.into_iter().enumerate() {
            let segment = match button.get_attribute("data-segment") {
                Some(value) => value.parse::<SegmentId>().ok(),
                None => SegmentId::from_index(position),
            };
            let Some(segment) = segment else {
                log_warn!(
                    LogComponent::Presentation("DashboardApi"),
                    "expand button #{} has no known segment",
                    position
                );
                continue;
            };
            adopt_segment_ids(&button, segment);
            let dashboard = self.dashboard.clone();
            self.listeners.push(EventListener::new(&button, "click", move |event| {
                event.prevent_default();
                event.stop_propagation();
                dashboard.dispatch(Intent::ToggleDetails(segment));
            }));
        }

        log_info!(
            LogComponent::Presentation("DashboardApi"),
            "attached {} listeners",
            self.listeners.len()
        );
        self.dashboard.dispatch(Intent::Load);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectPeriod)]
    pub fn select_period(&self, period: &str) -> Result<(), JsValue> {
        self.dashboard.select_period(period).map_err(|e| {
            log_warn!(LogComponent::Presentation("DashboardApi"), "{}", e);
            JsValue::from(e)
        })
    }

    #[wasm_bindgen(js_name = toggleDetails)]
    pub fn toggle_details(&self, segment: &str) -> Result<(), JsValue> {
        self.dashboard.toggle_details(segment).map_err(|e| {
            log_warn!(LogComponent::Presentation("DashboardApi"), "{}", e);
            JsValue::from(e)
        })
    }

    /// Active granularity, `"quarterly"` or `"annual"`.
    pub fn period(&self) -> String {
        self.dashboard.granularity().to_string()
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.dashboard.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl DashboardApi {
    fn build(store: Arc<FactStore>, config_json: Option<&str>) -> DashboardResult<Self> {
        let config = DashboardConfig::from_optional_json(config_json).map_err(|e| {
            log_error!(LogComponent::Presentation("DashboardApi"), "rejected config: {}", e);
            e
        })?;
        get_logger().set_min_level(config.log_level);
        let dashboard = Dashboard::new(store, config)?;
        Ok(Self { dashboard, listeners: Vec::new() })
    }
}

/// Gives an id-less expand button, and the `.segment-details` panel of its
/// enclosing `.segment-card`, the ids the toggle effects address.
fn adopt_segment_ids(button: &Element, segment: SegmentId) {
    if button.id().is_empty() {
        button.set_id(&MountId::ExpandButton(segment).element_id());
    }
    let panel = button
        .closest(".segment-card")
        .ok()
        .flatten()
        .and_then(|card| card.query_selector(".segment-details").ok().flatten());
    match panel {
        Some(panel) if panel.id().is_empty() => panel.set_id(&MountId::SegmentDetails(segment).element_id()),
        Some(_) => {}
        None => log_warn!(
            LogComponent::Presentation("DashboardApi"),
            "no details panel next to the {} expand button",
            segment
        ),
    }
}

fn elements(document: &web_sys::Document, selector: &str) -> DashboardResult<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|_| DashboardError::MissingMountPoint(selector.to_string()))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Renders the dashboard markup into `<body>` and loads the initial view.
#[wasm_bindgen]
pub fn mount_dashboard(config_json: Option<String>) -> Result<DashboardApi, JsValue> {
    let api = DashboardApi::build(FactStore::builtin(), config_json.as_deref())?;
    let dashboard = api.dashboard.clone();
    leptos::mount_to_body(move || leptos::view! { <App dashboard=dashboard.clone() /> });
    api.dashboard.dispatch(Intent::Load);
    log_info!(LogComponent::Presentation("DashboardApi"), "dashboard mounted");
    Ok(api)
}
