//! Text rendering of derived figures.
//!
//! Numbers print with Rust's shortest round-trip form, so `115.0` becomes
//! `115` and `76.4` stays `76.4`.

use super::PercentChange;
use crate::domain::facts::{MetricUnit, SubMetric};

pub const NOT_AVAILABLE: &str = "N/A";

/// `$76.4B`
pub fn format_billions(value: f64) -> String {
    format!("${}B", value)
}

/// `$3.65`
pub fn format_eps(value: f64) -> String {
    format!("${}", value)
}

/// Whole percent with explicit sign: `+18%`, `+0%`, `-30%`.
pub fn format_percent(value: f64) -> String {
    let rounded = round_percent(value);
    // -0.0 >= 0.0 holds, so a tiny negative change prints as `+0%`
    if rounded >= 0.0 {
        format!("+{}%", rounded.abs())
    } else {
        format!("{}%", rounded)
    }
}

pub fn format_change(change: PercentChange) -> String {
    match change {
        PercentChange::Defined(value) => format_percent(value),
        PercentChange::Undefined => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_sub_metric(metric: &SubMetric) -> String {
    match metric.unit {
        MetricUnit::Percent => format_percent(metric.value),
        MetricUnit::BillionsUsd => format_billions(metric.value),
        MetricUnit::Millions => format!("{}M", metric.value),
    }
}

/// Half away from zero.
pub fn round_percent(value: f64) -> f64 {
    value.round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billions_drop_trailing_zero_fraction() {
        assert_eq!(format_billions(76.4), "$76.4B");
        assert_eq!(format_billions(115.0), "$115B");
        assert_eq!(format_eps(3.65), "$3.65");
    }

    #[test]
    fn percent_signs() {
        assert_eq!(format_percent(18.08), "+18%");
        assert_eq!(format_percent(0.0), "+0%");
        assert_eq!(format_percent(-0.3), "+0%");
        assert_eq!(format_percent(-30.0), "-30%");
        assert_eq!(format_percent(-4.5), "-5%");
        assert_eq!(format_percent(2.5), "+3%");
    }

    #[test]
    fn undefined_change_is_not_available() {
        assert_eq!(format_change(PercentChange::Undefined), "N/A");
        assert_eq!(format_change(PercentChange::Defined(14.93)), "+15%");
    }

    #[test]
    fn sub_metric_units() {
        let m = |value, unit| SubMetric { key: "k".into(), label: "K".into(), value, unit };
        assert_eq!(format_sub_metric(&m(-5.0, MetricUnit::Percent)), "-5%");
        assert_eq!(format_sub_metric(&m(75.0, MetricUnit::BillionsUsd)), "$75B");
        assert_eq!(format_sub_metric(&m(89.0, MetricUnit::Millions)), "89M");
    }
}
