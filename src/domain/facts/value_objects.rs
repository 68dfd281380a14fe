use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumCount, EnumIter, EnumString};

/// Reporting granularity; the only session state that changes the figures.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    #[display(fmt = "quarterly")]
    #[strum(serialize = "quarterly")]
    Quarterly,
    #[display(fmt = "annual")]
    #[strum(serialize = "annual")]
    Annual,
}

/// Which of the two periods of a granularity a figure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PeriodRole {
    #[display(fmt = "current")]
    Current,
    #[display(fmt = "prior")]
    Prior,
}

/// Positional identifier of a business segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SegmentId {
    #[display(fmt = "productivity")]
    #[strum(serialize = "productivity")]
    Productivity,
    #[display(fmt = "cloud")]
    #[strum(serialize = "cloud")]
    Cloud,
    #[display(fmt = "computing")]
    #[strum(serialize = "computing")]
    Computing,
}

pub const SEGMENT_COUNT: usize = <SegmentId as EnumCount>::COUNT;

impl SegmentId {
    pub const ALL: [SegmentId; SEGMENT_COUNT] =
        [SegmentId::Productivity, SegmentId::Cloud, SegmentId::Computing];

    pub fn index(self) -> usize {
        match self {
            SegmentId::Productivity => 0,
            SegmentId::Cloud => 1,
            SegmentId::Computing => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Unit of a segment sub-metric, decides how it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Percent,
    BillionsUsd,
    Millions,
}
