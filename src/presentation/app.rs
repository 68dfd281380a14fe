use leptos::*;

use super::dashboard::Dashboard;
use crate::domain::chart::ChartKind;
use crate::domain::facts::{Granularity, Segment, SegmentId};
use crate::domain::metrics::{TopMetricKind, format::format_sub_metric};
use crate::view_state::{Intent, MountId, VIEW_DETAILS};

const STYLE: &str = r#"
.financial-dashboard {
    font-family: 'FKGroteskNeue', 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
    background: #FCFCF9;
    color: #13343B;
    min-height: 100vh;
    padding: 24px;
}
.dashboard-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
.company-meta { color: #626C71; font-size: 14px; }
.toggle-btn {
    border: 1px solid #5E5240; background: transparent; padding: 6px 16px;
    border-radius: 8px; cursor: pointer; margin-left: 4px; outline: none;
}
.toggle-btn.active { background: #21808D; color: #FCFCF9; border-color: #21808D; }
.metrics-grid, .segments-grid, .charts-grid { display: grid; gap: 16px; margin-bottom: 24px; }
.metrics-grid { grid-template-columns: repeat(4, 1fr); }
.segments-grid, .charts-grid { grid-template-columns: repeat(3, 1fr); }
.metric-card, .segment-card, .chart-card {
    background: #FFFFFD; border: 1px solid rgba(94, 82, 64, 0.12); border-radius: 12px; padding: 16px;
}
.metric-value { font-size: 28px; font-weight: 600; }
.metric-change, .segment-growth { color: #21808D; font-weight: 500; }
.expand-btn { background: none; border: none; color: #21808D; cursor: pointer; padding: 0; outline: none; }
.hidden { display: none; }
.chart-container { position: relative; height: 300px; }
"#;

/// Page skeleton. Figures are written into it by the binder after mount.
#[component]
pub fn App(dashboard: Dashboard) -> impl IntoView {
    let store = dashboard.store();
    let segments: Vec<(SegmentId, Segment)> =
        store.identified_segments().map(|(id, segment)| (id, segment.clone())).collect();

    view! {
        <style>{STYLE}</style>
        <div class="financial-dashboard">
            <Header dashboard=dashboard.clone() />
            <MetricCards />
            <div class="segments-grid">
                {segments
                    .into_iter()
                    .map(|(id, segment)| view! { <SegmentCard dashboard=dashboard.clone() id=id segment=segment /> })
                    .collect_view()}
            </div>
            <ChartGrid />
        </div>
    }
}

#[component]
fn Header(dashboard: Dashboard) -> impl IntoView {
    let toggle = move |granularity: Granularity, label: &'static str| {
        let dashboard = dashboard.clone();
        view! {
            <button
                class="toggle-btn"
                data-period=granularity.to_string()
                on:click=move |ev| {
                    ev.prevent_default();
                    dashboard.dispatch(Intent::SelectGranularity(granularity));
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <header class="dashboard-header">
            <div>
                <h1 id=MountId::CompanyName.element_id()></h1>
                <div class="company-meta">
                    <span id=MountId::Ticker.element_id()></span>
                    " • Market Cap "
                    <span id=MountId::MarketCap.element_id()></span>
                </div>
            </div>
            <div class="period-toggle">
                {toggle(Granularity::Quarterly, "Quarterly")}
                {toggle(Granularity::Annual, "Annual")}
            </div>
        </header>
    }
}

#[component]
fn MetricCards() -> impl IntoView {
    let card = |kind: TopMetricKind, title: &'static str| {
        view! {
            <div class="metric-card">
                <div class="metric-title">{title}</div>
                <div class="metric-value" id=MountId::MetricValue(kind).element_id()></div>
                <div class="metric-change" id=MountId::MetricChange(kind).element_id()></div>
            </div>
        }
    };

    view! {
        <div class="metrics-grid">
            {card(TopMetricKind::Revenue, "Total Revenue")}
            {card(TopMetricKind::NetIncome, "Net Income")}
            {card(TopMetricKind::OperatingIncome, "Operating Income")}
            {card(TopMetricKind::Eps, "Earnings Per Share")}
        </div>
    }
}

#[component]
fn SegmentCard(dashboard: Dashboard, id: SegmentId, segment: Segment) -> impl IntoView {
    let products = segment.key_products.join(", ");
    let metrics = segment
        .key_metrics
        .iter()
        .map(|metric| {
            let value = format_sub_metric(metric);
            let label = metric.label.clone();
            view! { <li><span>{label}</span>": "<strong>{value}</strong></li> }
        })
        .collect_view();

    view! {
        <div class="segment-card" data-segment=id.to_string()>
            <h3>{segment.name.clone()}</h3>
            <div class="segment-revenue" id=MountId::SegmentRevenue(id).element_id()></div>
            <div class="segment-growth" id=MountId::SegmentGrowth(id).element_id()></div>
            <button
                class="expand-btn"
                data-segment=id.to_string()
                id=MountId::ExpandButton(id).element_id()
                on:click=move |ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    dashboard.dispatch(Intent::ToggleDetails(id));
                }
            >
                {VIEW_DETAILS}
            </button>
            <div class="segment-details hidden" id=MountId::SegmentDetails(id).element_id()>
                <p class="key-products">"Key products: "{products}</p>
                <ul class="key-metrics">{metrics}</ul>
            </div>
        </div>
    }
}

#[component]
fn ChartGrid() -> impl IntoView {
    ChartKind::ALL
        .into_iter()
        .map(|kind| {
            view! {
                <div class="chart-card">
                    <h3>{kind.to_string()}</h3>
                    <div class="chart-container">
                        <canvas id=kind.canvas_id()></canvas>
                    </div>
                </div>
            }
        })
        .collect_view()
        .into_view()
}
