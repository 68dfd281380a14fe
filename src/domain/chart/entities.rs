use serde::Serialize;

use super::value_objects::{ChartKind, ChartType, Color, LegendPosition, SEGMENT_PALETTE};
use crate::domain::facts::{FactStore, Granularity, PeriodRole, Segment};

/// A series aligned by index with the payload labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// Either one color for the whole series or one per point.
    pub background: Vec<Color>,
    pub border: Vec<Color>,
    pub border_width: u32,
}

impl Dataset {
    fn uniform(label: &str, data: Vec<f64>, color: Color) -> Self {
        Self {
            label: Some(label.to_string()),
            data,
            background: vec![color],
            border: vec![color],
            border_width: 1,
        }
    }

    fn per_point(label: Option<&str>, data: Vec<f64>, border_width: u32) -> Self {
        Self {
            label: label.map(str::to_string),
            data,
            background: SEGMENT_PALETTE.to_vec(),
            border: SEGMENT_PALETTE.to_vec(),
            border_width,
        }
    }

    pub fn color_at(&self, index: usize) -> Color {
        match self.background.len() {
            0 => Color::TEAL,
            len => self.background[index % len],
        }
    }
}

/// Everything a rendering surface needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub kind: ChartKind,
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub legend: LegendPosition,
    pub y_axis_title: Option<String>,
    pub begin_at_zero: bool,
}

impl ChartPayload {
    /// Values of the first series; the only series for pie and growth charts.
    pub fn primary_series(&self) -> &[f64] {
        self.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[])
    }
}

fn segment_series(store: &FactStore, pick: impl Fn(&Segment) -> f64) -> Vec<f64> {
    store.segments().iter().map(pick).collect()
}

pub fn derive_chart_payload(store: &FactStore, kind: ChartKind, granularity: Granularity) -> ChartPayload {
    let labels: Vec<String> = store.segments().iter().map(|s| s.chart_label.clone()).collect();
    let current = segment_series(store, |s| s.revenue(granularity, PeriodRole::Current));

    let (datasets, legend, y_axis_title) = match kind {
        ChartKind::RevenueComparison => {
            let prior = segment_series(store, |s| s.revenue(granularity, PeriodRole::Prior));
            let periods = store.periods(granularity);
            (
                vec![
                    Dataset::uniform(&periods.current.label, current, Color::TEAL),
                    Dataset::uniform(&periods.prior.label, prior, Color::PEACH),
                ],
                LegendPosition::Top,
                Some("Revenue (Billions USD)"),
            )
        }
        ChartKind::Distribution => (vec![Dataset::per_point(None, current, 2)], LegendPosition::Bottom, None),
        ChartKind::Growth => {
            let growth = segment_series(store, |s| s.growth_rate(granularity));
            (
                vec![Dataset::per_point(Some("Growth Rate (%)"), growth, 1)],
                LegendPosition::Hidden,
                Some("Growth Rate (%)"),
            )
        }
    };

    ChartPayload {
        kind,
        chart_type: kind.chart_type(),
        labels,
        datasets,
        legend,
        y_axis_title: y_axis_title.map(str::to_string),
        begin_at_zero: kind.chart_type() == ChartType::Bar,
    }
}
