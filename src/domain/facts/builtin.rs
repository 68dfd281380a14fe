use once_cell::sync::Lazy;
use std::sync::Arc;

use super::entities::{CompanyInfo, FactStore, PeriodPair, PeriodSnapshot, Segment, SubMetric};
use super::value_objects::MetricUnit;

pub(super) static BUILTIN: Lazy<Arc<FactStore>> = Lazy::new(|| Arc::new(microsoft_fy2025()));

fn metric(key: &str, label: &str, value: f64, unit: MetricUnit) -> SubMetric {
    SubMetric { key: key.to_string(), label: label.to_string(), value, unit }
}

fn products(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn snapshot(label: &str, revenue: f64, net: f64, operating: f64, eps: f64) -> PeriodSnapshot {
    PeriodSnapshot {
        label: label.to_string(),
        total_revenue: revenue,
        net_income: net,
        operating_income: operating,
        earnings_per_share: eps,
    }
}

/// Microsoft, Q4 and full fiscal year 2025 against 2024.
fn microsoft_fy2025() -> FactStore {
    use MetricUnit::*;

    let segments = vec![
        Segment {
            name: "Productivity and Business Processes".into(),
            chart_label: "Productivity & Business".into(),
            key_products: products(&["Office 365", "Microsoft Teams", "LinkedIn", "Dynamics 365"]),
            quarter_revenue: 33.1,
            prior_quarter_revenue: 28.5,
            year_revenue: 130.5,
            prior_year_revenue: 116.5,
            quarterly_growth: 16.0,
            annual_growth: 13.0,
            key_metrics: vec![
                metric("office_365_commercial_growth", "Office 365 Commercial Growth", 15.0, Percent),
                metric("linkedin_revenue_growth", "LinkedIn Revenue Growth", 9.0, Percent),
                metric("dynamics_365_growth", "Dynamics 365 Growth", 19.0, Percent),
                metric(
                    "microsoft_365_consumer_subscribers",
                    "Microsoft 365 Consumer Subscribers",
                    89.0,
                    Millions,
                ),
            ],
        },
        Segment {
            name: "Intelligent Cloud".into(),
            chart_label: "Intelligent Cloud".into(),
            key_products: products(&["Azure", "SQL Server", "Windows Server", "GitHub"]),
            quarter_revenue: 29.9,
            prior_quarter_revenue: 23.7,
            year_revenue: 115.0,
            prior_year_revenue: 96.8,
            quarterly_growth: 26.0,
            annual_growth: 20.0,
            key_metrics: vec![
                metric("azure_annual_revenue", "Azure Annual Revenue", 75.0, BillionsUsd),
                metric("azure_growth_rate", "Azure Growth Rate", 34.0, Percent),
                metric("azure_quarterly_growth", "Azure Quarterly Growth", 39.0, Percent),
                metric("server_products_growth", "Server Products Growth", -5.0, Percent),
            ],
        },
        Segment {
            name: "More Personal Computing".into(),
            chart_label: "More Personal Computing".into(),
            key_products: products(&["Windows", "Xbox", "Surface", "Bing Search"]),
            quarter_revenue: 13.5,
            prior_quarter_revenue: 12.4,
            year_revenue: 58.7,
            prior_year_revenue: 54.7,
            quarterly_growth: 9.0,
            annual_growth: 7.0,
            key_metrics: vec![
                metric("gaming_revenue_growth", "Gaming Revenue Growth", 50.0, Percent),
                metric("xbox_content_services_growth", "Xbox Content & Services Growth", 61.0, Percent),
                metric("xbox_hardware_decline", "Xbox Hardware Decline", -30.0, Percent),
                metric("windows_oem_growth", "Windows OEM Growth", 3.0, Percent),
                metric("search_advertising_growth", "Search Advertising Growth", 21.0, Percent),
            ],
        },
    ];

    let company = CompanyInfo {
        name: "Microsoft Corporation".into(),
        ticker: "MSFT".into(),
        market_cap: "3.8T".into(),
    };
    let quarterly = PeriodPair {
        current: snapshot("Q4 2025", 76.4, 27.2, 34.3, 3.65),
        prior: snapshot("Q4 2024", 64.7, 22.0, 27.9, 2.95),
    };
    let annual = PeriodPair {
        current: snapshot("FY 2025", 281.7, 101.8, 128.5, 13.64),
        prior: snapshot("FY 2024", 245.1, 88.1, 109.4, 11.86),
    };

    FactStore { company, segments, quarterly, annual }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::facts::{Granularity, PeriodRole, SegmentId};

    #[test]
    fn builtin_is_shared() {
        let a = FactStore::builtin();
        let b = FactStore::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn builtin_has_one_entry_per_segment_id() {
        assert_eq!(FactStore::builtin().segments().len(), SegmentId::ALL.len());
    }

    #[test]
    fn builtin_lookups() {
        let store = FactStore::builtin();
        assert_eq!(store.company().ticker, "MSFT");
        assert_eq!(store.snapshot(Granularity::Annual, PeriodRole::Prior).label, "FY 2024");
        assert_eq!(store.segment(SegmentId::Cloud).name, "Intelligent Cloud");
        assert_eq!(store.segment(SegmentId::Computing).growth_rate(Granularity::Annual), 7.0);
    }

    #[test]
    fn json_roundtrip_keeps_validation() {
        let store = FactStore::builtin();
        let json = serde_json::to_string(store.as_ref()).unwrap();
        let parsed = FactStore::from_json(&json).unwrap();
        assert_eq!(&parsed, store.as_ref());

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["segments"].as_array_mut().unwrap().pop();
        let err = FactStore::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("expected 3 segments"));
    }
}
