use financial_dashboard_wasm::domain::chart::{ChartKind, derive_chart_payload};
use financial_dashboard_wasm::domain::facts::{FactStore, Granularity, SegmentId};
use financial_dashboard_wasm::domain::metrics::{
    PercentChange, TopMetricKind, derive_segment_figures, derive_top_metrics, percent_change,
};
use financial_dashboard_wasm::view_state::{Intent, MountId, UiEffect, ViewState, handle_event};
use quickcheck_macros::quickcheck;

fn text_of(effects: &[UiEffect], target: MountId) -> Option<&str> {
    effects.iter().find_map(|e| match e {
        UiEffect::SetText { target: t, text } if *t == target => Some(text.as_str()),
        _ => None,
    })
}

fn texts(effects: &[UiEffect]) -> Vec<(MountId, String)> {
    effects
        .iter()
        .filter_map(|e| match e {
            UiEffect::SetText { target, text } => Some((*target, text.clone())),
            _ => None,
        })
        .collect()
}

/// Builtin figures with the quarterly prior net income replaced.
fn store_with_prior_net_income(prior: f64) -> FactStore {
    let mut json = serde_json::to_value(FactStore::builtin().as_ref()).unwrap();
    json["quarterly"]["prior"]["net_income"] = serde_json::json!(prior);
    FactStore::from_json(&json.to_string()).unwrap()
}

#[test]
fn segment_figures_keep_fixed_order_for_both_granularities() {
    let store = FactStore::builtin();
    for granularity in [Granularity::Quarterly, Granularity::Annual] {
        let figures = derive_segment_figures(&store, granularity);
        let ids: Vec<SegmentId> = figures.iter().map(|f| f.segment).collect();
        assert_eq!(ids, SegmentId::ALL.to_vec());
    }
}

#[test]
fn revenue_changes_round_to_whole_percent() {
    let store = FactStore::builtin();
    let quarterly = derive_top_metrics(&store, Granularity::Quarterly);
    let annual = derive_top_metrics(&store, Granularity::Annual);
    assert_eq!(quarterly.revenue.change.rounded(), Some(18.0));
    assert_eq!(annual.revenue.change.rounded(), Some(15.0));
}

#[test]
fn top_metrics_are_idempotent() {
    let store = FactStore::builtin();
    assert_eq!(
        derive_top_metrics(&store, Granularity::Annual),
        derive_top_metrics(&store, Granularity::Annual)
    );
}

#[test]
fn quarterly_annual_quarterly_restores_the_first_render() {
    let store = FactStore::builtin();
    let (state, first) = handle_event(&store, &ViewState::default(), Intent::Load);
    let (state, annual) = handle_event(&store, &state, Intent::SelectGranularity(Granularity::Annual));
    let (_, back) = handle_event(&store, &state, Intent::SelectGranularity(Granularity::Quarterly));

    assert_ne!(texts(&annual), texts(&back));
    for (target, text) in texts(&back) {
        assert_eq!(text_of(&first, target), Some(text.as_str()), "{:?}", target);
    }
}

#[test]
fn zero_prior_renders_not_available_and_keeps_other_fields() {
    let store = store_with_prior_net_income(0.0);
    let metrics = derive_top_metrics(&store, Granularity::Quarterly);
    assert_eq!(metrics.net_income.change, PercentChange::Undefined);
    assert!(metrics.first_error().is_some());

    let (_, effects) = handle_event(&store, &ViewState::default(), Intent::Load);
    assert_eq!(text_of(&effects, MountId::MetricChange(TopMetricKind::NetIncome)), Some("N/A"));
    assert_eq!(text_of(&effects, MountId::MetricValue(TopMetricKind::NetIncome)), Some("$27.2B"));
    assert_eq!(text_of(&effects, MountId::MetricChange(TopMetricKind::Revenue)), Some("+18%"));
    assert_eq!(text_of(&effects, MountId::SegmentGrowth(SegmentId::Cloud)), Some("+26%"));
}

#[test]
fn subnormal_prior_renders_not_available() {
    let store = store_with_prior_net_income(1e-310);
    assert_eq!(
        derive_top_metrics(&store, Granularity::Quarterly).net_income.change,
        PercentChange::Undefined
    );

    let (_, effects) = handle_event(&store, &ViewState::default(), Intent::Load);
    assert_eq!(text_of(&effects, MountId::MetricChange(TopMetricKind::NetIncome)), Some("N/A"));
    assert_eq!(text_of(&effects, MountId::MetricChange(TopMetricKind::Eps)), Some("+24%"));
}

#[test]
fn quarterly_load_end_to_end() {
    let store = FactStore::builtin();
    let (_, effects) = handle_event(&store, &ViewState::default(), Intent::Load);
    assert_eq!(text_of(&effects, MountId::MetricValue(TopMetricKind::Revenue)), Some("$76.4B"));
    assert_eq!(text_of(&effects, MountId::MetricChange(TopMetricKind::Revenue)), Some("+18%"));
    assert_eq!(text_of(&effects, MountId::CompanyName), Some("Microsoft Corporation"));

    let growth = derive_chart_payload(&store, ChartKind::Growth, Granularity::Quarterly);
    assert_eq!(growth.datasets[0].data, vec![16.0, 26.0, 9.0]);
}

#[test]
fn quarterly_view_text() {
    let store = FactStore::builtin();
    let (_, effects) = handle_event(&store, &ViewState::default(), Intent::Load);
    let line = |targets: &[MountId]| {
        targets
            .iter()
            .map(|t| text_of(&effects, *t).unwrap_or("-"))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let metrics: Vec<MountId> = [TopMetricKind::Revenue, TopMetricKind::NetIncome, TopMetricKind::OperatingIncome, TopMetricKind::Eps]
        .into_iter()
        .flat_map(|kind| [MountId::MetricValue(kind), MountId::MetricChange(kind)])
        .collect();
    insta::assert_snapshot!(line(&metrics), @"$76.4B +18% $27.2B +24% $34.3B +23% $3.65 +24%");

    let segments: Vec<MountId> = SegmentId::ALL
        .into_iter()
        .flat_map(|id| [MountId::SegmentRevenue(id), MountId::SegmentGrowth(id)])
        .collect();
    insta::assert_snapshot!(line(&segments), @"$33.1B +16% $29.9B +26% $13.5B +9%");
}

#[quickcheck]
fn percent_change_sign_follows_difference(current: u32, prior: u32) -> bool {
    let (current, prior) = (current as f64, prior as f64 + 1.0);
    match percent_change("total_revenue", current, prior) {
        Ok(pct) => (pct > 0.0) == (current > prior) && (pct == 0.0) == (current == prior),
        Err(_) => false,
    }
}

#[quickcheck]
fn zero_prior_is_always_an_error(current: f64) -> bool {
    percent_change("net_income", current, 0.0).is_err()
}

#[quickcheck]
fn toggle_parity_decides_expansion(toggles: Vec<u8>) -> bool {
    let store = FactStore::builtin();
    let mut state = ViewState::default();
    for t in &toggles {
        let segment = SegmentId::ALL[*t as usize % SegmentId::ALL.len()];
        state = handle_event(&store, &state, Intent::ToggleDetails(segment)).0;
    }
    SegmentId::ALL.into_iter().all(|segment| {
        let count = toggles
            .iter()
            .filter(|t| SegmentId::ALL[**t as usize % SegmentId::ALL.len()] == segment)
            .count();
        state.is_expanded(segment) == (count % 2 == 1)
    }) && state.granularity == Granularity::Quarterly
}

#[quickcheck]
fn details_survive_period_switches(switches: Vec<bool>) -> bool {
    let store = FactStore::builtin();
    let (mut state, _) = handle_event(&store, &ViewState::default(), Intent::ToggleDetails(SegmentId::Computing));
    for annual in switches {
        let granularity = if annual { Granularity::Annual } else { Granularity::Quarterly };
        state = handle_event(&store, &state, Intent::SelectGranularity(granularity)).0;
    }
    state.is_expanded(SegmentId::Computing) && !state.is_expanded(SegmentId::Cloud)
}
