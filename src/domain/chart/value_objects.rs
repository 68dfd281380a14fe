use derive_more::Display;
use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

/// Which of the three dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[display(fmt = "Revenue Comparison")]
    #[strum(serialize = "revenue")]
    RevenueComparison,
    #[display(fmt = "Revenue Distribution")]
    #[strum(serialize = "distribution")]
    Distribution,
    #[display(fmt = "Segment Growth")]
    #[strum(serialize = "growth")]
    Growth,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::RevenueComparison, ChartKind::Distribution, ChartKind::Growth];

    pub fn slot(self) -> usize {
        match self {
            ChartKind::RevenueComparison => 0,
            ChartKind::Distribution => 1,
            ChartKind::Growth => 2,
        }
    }

    pub fn chart_type(self) -> ChartType {
        match self {
            ChartKind::Distribution => ChartType::Pie,
            ChartKind::RevenueComparison | ChartKind::Growth => ChartType::Bar,
        }
    }

    /// Id of the canvas the chart is drawn into.
    pub fn canvas_id(self) -> &'static str {
        match self {
            ChartKind::RevenueComparison => "revenueChart",
            ChartKind::Distribution => "distributionChart",
            ChartKind::Growth => "growthChart",
        }
    }
}

/// Shape handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[display(fmt = "bar")]
    #[strum(serialize = "bar")]
    Bar,
    #[display(fmt = "pie")]
    #[strum(serialize = "pie")]
    Pie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Hidden,
}

/// CSS hex color, e.g. `#1FB8CD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[display(fmt = "{}", _0)]
pub struct Color(pub &'static str);

impl Color {
    pub const TEAL: Color = Color("#1FB8CD");
    pub const PEACH: Color = Color("#FFC185");
    pub const BRICK: Color = Color("#B4413C");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// One color per segment, in segment order.
pub const SEGMENT_PALETTE: [Color; 3] = [Color::TEAL, Color::PEACH, Color::BRICK];
