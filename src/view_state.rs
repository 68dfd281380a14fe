//! Session state and the pure event dispatcher.
//!
//! `handle_event` never touches the page: it returns the next [`ViewState`]
//! and the list of [`UiEffect`]s the binder and chart adapter apply.

use serde::Serialize;

use crate::domain::chart::{ChartKind, ChartPayload, derive_chart_payload};
use crate::domain::facts::{FactStore, Granularity, SEGMENT_COUNT, SegmentId};
use crate::domain::metrics::{
    SegmentFigure, TopMetricKind, TopMetrics, derive_segment_figures, derive_top_metrics,
    format::{format_billions, format_change, format_percent},
};

pub const VIEW_DETAILS: &str = "View Details";
pub const HIDE_DETAILS: &str = "Hide Details";
pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";

/// Everything the user can change. Owned by exactly one coordinator.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    pub granularity: Granularity,
    pub expanded: [bool; SEGMENT_COUNT],
}

impl ViewState {
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity, expanded: [false; SEGMENT_COUNT] }
    }

    pub fn is_expanded(&self, segment: SegmentId) -> bool {
        self.expanded[segment.index()]
    }
}

/// User intents (and the initial page load).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Load,
    SelectGranularity(Granularity),
    ToggleDetails(SegmentId),
}

/// Named insertion point on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MountId {
    CompanyName,
    Ticker,
    MarketCap,
    MetricValue(TopMetricKind),
    MetricChange(TopMetricKind),
    SegmentRevenue(SegmentId),
    SegmentGrowth(SegmentId),
    SegmentDetails(SegmentId),
    ExpandButton(SegmentId),
    PeriodToggle(Granularity),
    ChartCanvas(ChartKind),
}

impl MountId {
    /// CSS selector resolving the insertion point in the document.
    pub fn selector(&self) -> String {
        match self {
            MountId::PeriodToggle(granularity) => format!(".toggle-btn[data-period=\"{}\"]", granularity),
            other => format!("#{}", other.element_id()),
        }
    }

    /// Element id; toggles are addressed by their `data-period` instead.
    pub fn element_id(&self) -> String {
        match self {
            MountId::CompanyName => "company-name".into(),
            MountId::Ticker => "company-ticker".into(),
            MountId::MarketCap => "market-cap".into(),
            MountId::MetricValue(kind) => match kind {
                TopMetricKind::Revenue => "total-revenue",
                TopMetricKind::NetIncome => "net-income",
                TopMetricKind::OperatingIncome => "operating-income",
                TopMetricKind::Eps => "eps",
            }
            .into(),
            MountId::MetricChange(kind) => match kind {
                TopMetricKind::Revenue => "revenue-change",
                TopMetricKind::NetIncome => "income-change",
                TopMetricKind::OperatingIncome => "operating-change",
                TopMetricKind::Eps => "eps-change",
            }
            .into(),
            MountId::SegmentRevenue(id) => format!("{}-revenue", id),
            MountId::SegmentGrowth(id) => format!("{}-growth", id),
            MountId::SegmentDetails(id) => format!("{}-details", id),
            MountId::ExpandButton(id) => format!("{}-expand", id),
            MountId::PeriodToggle(granularity) => format!("toggle-{}", granularity),
            MountId::ChartCanvas(kind) => kind.canvas_id().into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEffect {
    SetText { target: MountId, text: String },
    SetClass { target: MountId, class: &'static str, enabled: bool },
    /// Destroy every mounted chart now.
    TeardownCharts,
    /// Create all charts now.
    CreateCharts,
    /// Create all charts after the configured delay, superseding any pending rebuild.
    ScheduleChartRebuild,
}

fn text(target: MountId, text: String) -> UiEffect {
    UiEffect::SetText { target, text }
}

fn figure_effects(store: &FactStore, granularity: Granularity, effects: &mut Vec<UiEffect>) {
    for granularity_option in [Granularity::Quarterly, Granularity::Annual] {
        effects.push(UiEffect::SetClass {
            target: MountId::PeriodToggle(granularity_option),
            class: ACTIVE_CLASS,
            enabled: granularity_option == granularity,
        });
    }

    let metrics = derive_top_metrics(store, granularity);
    for (kind, metric) in metrics.entries() {
        effects.push(text(MountId::MetricValue(kind), kind.format_value(metric.value)));
        effects.push(text(MountId::MetricChange(kind), format_change(metric.change)));
    }

    for figure in derive_segment_figures(store, granularity) {
        effects.push(text(MountId::SegmentRevenue(figure.segment), format_billions(figure.revenue)));
        effects.push(text(MountId::SegmentGrowth(figure.segment), format_percent(figure.growth_rate)));
    }
}

fn details_effects(segment: SegmentId, expanded: bool, effects: &mut Vec<UiEffect>) {
    effects.push(UiEffect::SetClass {
        target: MountId::SegmentDetails(segment),
        class: HIDDEN_CLASS,
        enabled: !expanded,
    });
    let label = if expanded { HIDE_DETAILS } else { VIEW_DETAILS };
    effects.push(text(MountId::ExpandButton(segment), label.to_string()));
}

pub fn handle_event(store: &FactStore, state: &ViewState, intent: Intent) -> (ViewState, Vec<UiEffect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match intent {
        Intent::Load => {
            let company = store.company();
            effects.push(text(MountId::CompanyName, company.name.clone()));
            effects.push(text(MountId::Ticker, company.ticker.clone()));
            effects.push(text(MountId::MarketCap, format!("${}", company.market_cap)));
            figure_effects(store, next.granularity, &mut effects);
            for segment in SegmentId::ALL {
                details_effects(segment, next.is_expanded(segment), &mut effects);
            }
            effects.push(UiEffect::TeardownCharts);
            effects.push(UiEffect::CreateCharts);
        }
        Intent::SelectGranularity(granularity) => {
            next.granularity = granularity;
            figure_effects(store, granularity, &mut effects);
            effects.push(UiEffect::TeardownCharts);
            effects.push(UiEffect::ScheduleChartRebuild);
        }
        Intent::ToggleDetails(segment) => {
            let expanded = !next.expanded[segment.index()];
            next.expanded[segment.index()] = expanded;
            details_effects(segment, expanded, &mut effects);
        }
    }

    (next, effects)
}

/// Every derived figure of one view, for inspection from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub state: ViewState,
    pub metrics: TopMetrics,
    pub segments: [SegmentFigure; SEGMENT_COUNT],
    pub charts: Vec<ChartPayload>,
}

pub fn snapshot(store: &FactStore, state: &ViewState) -> DashboardSnapshot {
    DashboardSnapshot {
        state: state.clone(),
        metrics: derive_top_metrics(store, state.granularity),
        segments: derive_segment_figures(store, state.granularity),
        charts: ChartKind::ALL
            .into_iter()
            .map(|kind| derive_chart_payload(store, kind, state.granularity))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(effects: &[UiEffect], target: MountId) -> Option<&str> {
        effects.iter().find_map(|e| match e {
            UiEffect::SetText { target: t, text } if *t == target => Some(text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn selectors() {
        assert_eq!(MountId::MetricValue(TopMetricKind::Revenue).selector(), "#total-revenue");
        assert_eq!(MountId::SegmentGrowth(SegmentId::Cloud).selector(), "#cloud-growth");
        assert_eq!(
            MountId::PeriodToggle(Granularity::Annual).selector(),
            ".toggle-btn[data-period=\"annual\"]"
        );
        assert_eq!(MountId::ChartCanvas(ChartKind::Growth).selector(), "#growthChart");
    }

    #[test]
    fn load_writes_quarterly_view() {
        let store = FactStore::builtin();
        let (state, effects) = handle_event(&store, &ViewState::default(), Intent::Load);
        assert_eq!(state, ViewState::default());
        assert_eq!(text_of(&effects, MountId::MetricValue(TopMetricKind::Revenue)), Some("$76.4B"));
        assert_eq!(text_of(&effects, MountId::MetricChange(TopMetricKind::Revenue)), Some("+18%"));
        assert_eq!(text_of(&effects, MountId::MetricValue(TopMetricKind::Eps)), Some("$3.65"));
        assert_eq!(text_of(&effects, MountId::MarketCap), Some("$3.8T"));
        assert_eq!(text_of(&effects, MountId::ExpandButton(SegmentId::Cloud)), Some(VIEW_DETAILS));
        assert_eq!(effects.last(), Some(&UiEffect::CreateCharts));
    }

    #[test]
    fn select_annual_schedules_rebuild() {
        let store = FactStore::builtin();
        let (state, effects) =
            handle_event(&store, &ViewState::default(), Intent::SelectGranularity(Granularity::Annual));
        assert_eq!(state.granularity, Granularity::Annual);
        assert_eq!(text_of(&effects, MountId::SegmentRevenue(SegmentId::Cloud)), Some("$115B"));
        assert_eq!(text_of(&effects, MountId::SegmentGrowth(SegmentId::Computing)), Some("+7%"));
        assert!(effects.contains(&UiEffect::SetClass {
            target: MountId::PeriodToggle(Granularity::Annual),
            class: ACTIVE_CLASS,
            enabled: true,
        }));
        let teardown = effects.iter().position(|e| *e == UiEffect::TeardownCharts).unwrap();
        let rebuild = effects.iter().position(|e| *e == UiEffect::ScheduleChartRebuild).unwrap();
        assert!(teardown < rebuild);
    }

    #[test]
    fn snapshot_serializes_current_view() {
        let store = FactStore::builtin();
        let json = serde_json::to_value(snapshot(&store, &ViewState::new(Granularity::Annual))).unwrap();
        assert_eq!(json["state"]["granularity"], "annual");
        assert_eq!(json["metrics"]["revenue"]["value"], 281.7);
        assert_eq!(json["segments"][1]["segment"], "cloud");
        assert_eq!(json["charts"][2]["datasets"][0]["data"][0], 13.0);
    }

    #[test]
    fn toggling_details_is_independent_of_period() {
        let store = FactStore::builtin();
        let (state, effects) =
            handle_event(&store, &ViewState::new(Granularity::Annual), Intent::ToggleDetails(SegmentId::Cloud));
        assert!(state.is_expanded(SegmentId::Cloud));
        assert!(!state.is_expanded(SegmentId::Productivity));
        assert_eq!(state.granularity, Granularity::Annual);
        assert_eq!(text_of(&effects, MountId::ExpandButton(SegmentId::Cloud)), Some(HIDE_DETAILS));
        assert!(!effects.iter().any(|e| matches!(e, UiEffect::TeardownCharts)));

        let (state, effects) = handle_event(&store, &state, Intent::ToggleDetails(SegmentId::Cloud));
        assert!(!state.is_expanded(SegmentId::Cloud));
        assert_eq!(text_of(&effects, MountId::ExpandButton(SegmentId::Cloud)), Some(VIEW_DETAILS));
    }
}
