//! Pixel geometry for bar and pie charts, computed from a payload at full
//! precision. Rendering surfaces only draw what this module lays out.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::entities::ChartPayload;
use super::value_objects::{Color, LegendPosition};

const TICK_TARGET: f64 = 5.0;
const GROUP_FILL: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Plot area left after reserving room for the axis, labels and legend.
pub fn plot_area(width: f64, height: f64, legend: LegendPosition, with_axis: bool) -> Rect {
    let left = if with_axis { 56.0 } else { 12.0 };
    let top = if legend == LegendPosition::Top { 36.0 } else { 12.0 };
    let bottom = match (legend, with_axis) {
        (LegendPosition::Bottom, _) => 40.0,
        (_, true) => 32.0,
        _ => 12.0,
    };
    Rect {
        x: left,
        y: top,
        width: (width - left - 12.0).max(0.0),
        height: (height - top - bottom).max(0.0),
    }
}

fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let base = 10f64.powf(raw.log10().floor());
    let fraction = raw / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Linear value axis with round tick marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ValueAxis {
    pub fn fit(values: impl IntoIterator<Item = f64>, begin_at_zero: bool) -> Self {
        let (mut lo, mut hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo > hi {
            lo = 0.0;
            hi = 0.0;
        }
        if begin_at_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if hi == lo {
            hi = lo + 1.0;
        }
        let step = nice_step((hi - lo) / TICK_TARGET);
        Self { min: (lo / step).floor() * step, max: (hi / step).ceil() * step, step }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count).map(|i| self.min + i as f64 * self.step).collect()
    }

    /// Y pixel of `value` inside `area` (larger values are higher up).
    pub fn project(&self, value: f64, area: &Rect) -> f64 {
        let ratio = (value - self.min) / (self.max - self.min);
        area.y + area.height * (1.0 - ratio)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub dataset: usize,
    pub index: usize,
    pub value: f64,
    pub rect: Rect,
    pub color: Color,
}

/// Grouped bars: one group per label, one bar per dataset inside a group.
pub fn bar_geometry(payload: &ChartPayload, area: &Rect, axis: &ValueAxis) -> Vec<BarGeometry> {
    let groups = payload.labels.len();
    let series = payload.datasets.len();
    if groups == 0 || series == 0 {
        return Vec::new();
    }

    let group_width = area.width / groups as f64;
    let inner = group_width * GROUP_FILL;
    let bar_width = inner / series as f64;
    let baseline = axis.project(0.0_f64.clamp(axis.min, axis.max), area);

    let mut bars = Vec::with_capacity(groups * series);
    for (d, dataset) in payload.datasets.iter().enumerate() {
        for (i, &value) in dataset.data.iter().enumerate().take(groups) {
            let top = axis.project(value, area);
            bars.push(BarGeometry {
                dataset: d,
                index: i,
                value,
                rect: Rect {
                    x: area.x + i as f64 * group_width + (group_width - inner) / 2.0 + d as f64 * bar_width,
                    y: top.min(baseline),
                    width: bar_width,
                    height: (baseline - top).abs(),
                },
                color: dataset.color_at(i),
            });
        }
    }
    bars
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Color,
}

/// Slices of the primary series, clockwise from twelve o'clock.
/// Non-positive values get no slice.
pub fn pie_slices(payload: &ChartPayload) -> Vec<PieSlice> {
    let Some(dataset) = payload.datasets.first() else {
        return Vec::new();
    };
    let total: f64 = dataset.data.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = -FRAC_PI_2;
    dataset
        .data
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .map(|(index, &value)| {
            let fraction = value / total;
            let start_angle = angle;
            angle += fraction * TAU;
            PieSlice { index, fraction, start_angle, end_angle: angle, color: dataset.color_at(index) }
        })
        .collect()
}
