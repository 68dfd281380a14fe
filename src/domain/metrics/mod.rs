//! Period-driven reducer: everything the dashboard prints is derived here
//! from a [`FactStore`] and a [`Granularity`], without side effects.

pub mod format;

use serde::Serialize;
use strum::EnumIter;

use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::facts::{
    FactStore, Granularity, PeriodRole, PeriodSnapshot, SEGMENT_COUNT, SegmentId,
};

/// `(current - prior) / prior * 100` at full precision.
///
/// A zero prior, or one so small that the ratio is not finite, is a
/// [`DashboardError::DivisionByZero`].
pub fn percent_change(metric: &'static str, current: f64, prior: f64) -> DashboardResult<f64> {
    if prior == 0.0 {
        return Err(DashboardError::DivisionByZero { metric });
    }
    let change = (current - prior) / prior * 100.0;
    if !change.is_finite() {
        return Err(DashboardError::DivisionByZero { metric });
    }
    Ok(change)
}

/// Period-over-period change, or the sentinel for a zero prior value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentChange {
    Defined(f64),
    Undefined,
}

impl PercentChange {
    pub fn rounded(self) -> Option<f64> {
        match self {
            PercentChange::Defined(value) => Some(format::round_percent(value)),
            PercentChange::Undefined => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TopMetricKind {
    Revenue,
    NetIncome,
    OperatingIncome,
    Eps,
}

impl TopMetricKind {
    pub fn field_name(self) -> &'static str {
        match self {
            TopMetricKind::Revenue => "total_revenue",
            TopMetricKind::NetIncome => "net_income",
            TopMetricKind::OperatingIncome => "operating_income",
            TopMetricKind::Eps => "earnings_per_share",
        }
    }

    fn read(self, snapshot: &PeriodSnapshot) -> f64 {
        match self {
            TopMetricKind::Revenue => snapshot.total_revenue,
            TopMetricKind::NetIncome => snapshot.net_income,
            TopMetricKind::OperatingIncome => snapshot.operating_income,
            TopMetricKind::Eps => snapshot.earnings_per_share,
        }
    }

    /// Display text for a current-period value of this metric.
    pub fn format_value(self, value: f64) -> String {
        match self {
            TopMetricKind::Eps => format::format_eps(value),
            _ => format::format_billions(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetric {
    pub value: f64,
    pub change: PercentChange,
}

impl DerivedMetric {
    fn derive(kind: TopMetricKind, current: &PeriodSnapshot, prior: &PeriodSnapshot) -> Self {
        let value = kind.read(current);
        let change = match percent_change(kind.field_name(), value, kind.read(prior)) {
            Ok(pct) => PercentChange::Defined(pct),
            Err(_) => PercentChange::Undefined,
        };
        Self { value, change }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopMetrics {
    pub revenue: DerivedMetric,
    pub net_income: DerivedMetric,
    pub operating_income: DerivedMetric,
    pub eps: DerivedMetric,
}

impl TopMetrics {
    pub fn get(&self, kind: TopMetricKind) -> &DerivedMetric {
        match kind {
            TopMetricKind::Revenue => &self.revenue,
            TopMetricKind::NetIncome => &self.net_income,
            TopMetricKind::OperatingIncome => &self.operating_income,
            TopMetricKind::Eps => &self.eps,
        }
    }

    /// All four metrics in card order.
    pub fn entries(&self) -> [(TopMetricKind, &DerivedMetric); 4] {
        [
            (TopMetricKind::Revenue, &self.revenue),
            (TopMetricKind::NetIncome, &self.net_income),
            (TopMetricKind::OperatingIncome, &self.operating_income),
            (TopMetricKind::Eps, &self.eps),
        ]
    }

    /// The division-by-zero condition of the first metric whose prior was zero.
    pub fn first_error(&self) -> Option<DashboardError> {
        self.entries().into_iter().find_map(|(kind, metric)| match metric.change {
            PercentChange::Undefined => Some(DashboardError::DivisionByZero { metric: kind.field_name() }),
            PercentChange::Defined(_) => None,
        })
    }
}

pub fn derive_top_metrics(store: &FactStore, granularity: Granularity) -> TopMetrics {
    let current = store.snapshot(granularity, PeriodRole::Current);
    let prior = store.snapshot(granularity, PeriodRole::Prior);
    TopMetrics {
        revenue: DerivedMetric::derive(TopMetricKind::Revenue, current, prior),
        net_income: DerivedMetric::derive(TopMetricKind::NetIncome, current, prior),
        operating_income: DerivedMetric::derive(TopMetricKind::OperatingIncome, current, prior),
        eps: DerivedMetric::derive(TopMetricKind::Eps, current, prior),
    }
}

/// Current-period revenue and the stored growth rate of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentFigure {
    pub segment: SegmentId,
    pub revenue: f64,
    pub growth_rate: f64,
}

pub fn derive_segment_figures(store: &FactStore, granularity: Granularity) -> [SegmentFigure; SEGMENT_COUNT] {
    SegmentId::ALL.map(|id| {
        let segment = store.segment(id);
        SegmentFigure {
            segment: id,
            revenue: segment.revenue(granularity, PeriodRole::Current),
            growth_rate: segment.growth_rate(granularity),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_matches_reported_figures() {
        let quarterly = percent_change("total_revenue", 76.4, 64.7).unwrap();
        assert!((quarterly - 18.083).abs() < 1e-3);
        assert_eq!(format::round_percent(quarterly), 18.0);

        let annual = percent_change("total_revenue", 281.7, 245.1).unwrap();
        assert_eq!(format::round_percent(annual), 15.0);
    }

    #[test]
    fn zero_prior_is_division_by_zero() {
        assert_eq!(
            percent_change("net_income", 5.0, 0.0),
            Err(DashboardError::DivisionByZero { metric: "net_income" })
        );
    }

    #[test]
    fn subnormal_prior_is_division_by_zero() {
        assert_eq!(
            percent_change("net_income", 27.2, 1e-310),
            Err(DashboardError::DivisionByZero { metric: "net_income" })
        );
        assert!(percent_change("net_income", f64::NAN, 22.0).is_err());
    }

    #[test]
    fn top_metrics_quarterly() {
        let metrics = derive_top_metrics(&FactStore::builtin(), Granularity::Quarterly);
        assert_eq!(metrics.revenue.value, 76.4);
        assert_eq!(metrics.revenue.change.rounded(), Some(18.0));
        assert_eq!(metrics.net_income.change.rounded(), Some(24.0));
        assert_eq!(metrics.operating_income.change.rounded(), Some(23.0));
        assert_eq!(metrics.eps.change.rounded(), Some(24.0));
        assert!(metrics.first_error().is_none());
    }

    #[test]
    fn top_metrics_annual() {
        let metrics = derive_top_metrics(&FactStore::builtin(), Granularity::Annual);
        assert_eq!(metrics.revenue.value, 281.7);
        assert_eq!(metrics.revenue.change.rounded(), Some(15.0));
        assert_eq!(metrics.net_income.change.rounded(), Some(16.0));
        assert_eq!(metrics.operating_income.change.rounded(), Some(17.0));
        assert_eq!(metrics.eps.change.rounded(), Some(15.0));
    }

    #[test]
    fn segment_growth_is_stored_not_derived() {
        let figures = derive_segment_figures(&FactStore::builtin(), Granularity::Quarterly);
        // 33.1 vs 28.5 would be 16.1%; the authored value is 16
        assert_eq!(figures[0].growth_rate, 16.0);
        assert_eq!(figures[1].revenue, 29.9);
        assert_eq!(figures[2].segment, SegmentId::Computing);
    }
}
