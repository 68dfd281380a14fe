use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::value_objects::{Granularity, MetricUnit, PeriodRole, SEGMENT_COUNT, SegmentId};
use crate::domain::errors::{DashboardError, DashboardResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub ticker: String,
    /// Already formatted, e.g. `3.8T`.
    pub market_cap: String,
}

/// Authored sub-metric shown in a segment's detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMetric {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub unit: MetricUnit,
}

/// Revenue figures are billions of USD, growth rates are whole percents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub chart_label: String,
    pub key_products: Vec<String>,
    pub quarter_revenue: f64,
    pub prior_quarter_revenue: f64,
    pub year_revenue: f64,
    pub prior_year_revenue: f64,
    pub quarterly_growth: f64,
    pub annual_growth: f64,
    #[serde(default)]
    pub key_metrics: Vec<SubMetric>,
}

impl Segment {
    pub fn revenue(&self, granularity: Granularity, role: PeriodRole) -> f64 {
        match (granularity, role) {
            (Granularity::Quarterly, PeriodRole::Current) => self.quarter_revenue,
            (Granularity::Quarterly, PeriodRole::Prior) => self.prior_quarter_revenue,
            (Granularity::Annual, PeriodRole::Current) => self.year_revenue,
            (Granularity::Annual, PeriodRole::Prior) => self.prior_year_revenue,
        }
    }

    /// Stored growth rate; never recomputed from the revenue pair.
    pub fn growth_rate(&self, granularity: Granularity) -> f64 {
        match granularity {
            Granularity::Quarterly => self.quarterly_growth,
            Granularity::Annual => self.annual_growth,
        }
    }
}

/// Top-level results for one (granularity, period) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub label: String,
    pub total_revenue: f64,
    pub net_income: f64,
    pub operating_income: f64,
    pub earnings_per_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPair {
    pub current: PeriodSnapshot,
    pub prior: PeriodSnapshot,
}

impl PeriodPair {
    pub fn get(&self, role: PeriodRole) -> &PeriodSnapshot {
        match role {
            PeriodRole::Current => &self.current,
            PeriodRole::Prior => &self.prior,
        }
    }
}

/// Read-only source of truth. Segment order is the order of [`SegmentId::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFactStore")]
pub struct FactStore {
    pub(super) company: CompanyInfo,
    pub(super) segments: Vec<Segment>,
    pub(super) quarterly: PeriodPair,
    pub(super) annual: PeriodPair,
}

#[derive(Deserialize)]
struct RawFactStore {
    company: CompanyInfo,
    segments: Vec<Segment>,
    quarterly: PeriodPair,
    annual: PeriodPair,
}

impl TryFrom<RawFactStore> for FactStore {
    type Error = DashboardError;

    fn try_from(raw: RawFactStore) -> Result<Self, Self::Error> {
        FactStore::new(raw.company, raw.segments, raw.quarterly, raw.annual)
    }
}

impl FactStore {
    pub fn new(
        company: CompanyInfo,
        segments: Vec<Segment>,
        quarterly: PeriodPair,
        annual: PeriodPair,
    ) -> DashboardResult<Self> {
        if segments.len() != SEGMENT_COUNT {
            return Err(DashboardError::InvalidFactStore(format!(
                "expected {} segments, got {}",
                SEGMENT_COUNT,
                segments.len()
            )));
        }
        Ok(Self { company, segments, quarterly, annual })
    }

    pub fn from_json(json: &str) -> DashboardResult<Self> {
        serde_json::from_str(json).map_err(|e| DashboardError::InvalidFactStore(e.to_string()))
    }

    /// The company record compiled into the crate.
    pub fn builtin() -> Arc<FactStore> {
        Arc::clone(&super::builtin::BUILTIN)
    }

    pub fn company(&self) -> &CompanyInfo {
        &self.company
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    /// Segments paired with their positional identifiers.
    pub fn identified_segments(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        SegmentId::ALL.into_iter().zip(self.segments.iter())
    }

    pub fn periods(&self, granularity: Granularity) -> &PeriodPair {
        match granularity {
            Granularity::Quarterly => &self.quarterly,
            Granularity::Annual => &self.annual,
        }
    }

    pub fn snapshot(&self, granularity: Granularity, role: PeriodRole) -> &PeriodSnapshot {
        self.periods(granularity).get(role)
    }
}
