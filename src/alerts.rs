use crate::formatter::{format_plain, to_fixed};
use crate::models::{AlertRecord, Kpi, Priority};

pub const MAX_ALERTS: usize = 3;

const MARKET_SHARE_FLOOR: f64 = 43.0;
const STOCK_OUT_CEILING: f64 = 10.0;

/// A threshold rule bound to one KPI name.
struct AlertRule {
    kpi_name: &'static str,
    fires: fn(&Kpi) -> bool,
    render: fn(&Kpi) -> AlertRecord,
}

static RULES: &[AlertRule] = &[
    AlertRule {
        kpi_name: "Stock-Out Instances per SKU",
        fires: |kpi| kpi.value > STOCK_OUT_CEILING,
        render: |kpi| AlertRecord {
            r#type: "stock-out".to_string(),
            message: format!(
                "Critical: {} stock-out instances detected across SKUs",
                format_plain(kpi.value)
            ),
            impact: "Estimated ₹2.4M revenue loss".to_string(),
            action: "Expedite production and distribution".to_string(),
            priority: Priority::Critical,
        },
    },
    AlertRule {
        kpi_name: "Cash Flow from Operations",
        fires: |kpi| kpi.target.is_some_and(|target| kpi.value < target),
        render: |kpi| AlertRecord {
            r#type: "cash-flow".to_string(),
            message: "Cash flow below target - immediate attention required".to_string(),
            impact: format!(
                "₹{}B gap to target",
                to_fixed(kpi.target.unwrap_or(kpi.value) - kpi.value, 2)
            ),
            action: "Review working capital management".to_string(),
            priority: Priority::Critical,
        },
    },
    AlertRule {
        kpi_name: "Market Share",
        fires: |kpi| kpi.value < MARKET_SHARE_FLOOR,
        render: |_| AlertRecord {
            r#type: "market-share".to_string(),
            message: "Market share decline detected in key segments".to_string(),
            impact: "Potential ₹5.8M revenue opportunity".to_string(),
            action: "Increase distribution and marketing".to_string(),
            priority: Priority::High,
        },
    },
];

/// Critical-priority alerts for the executive summary.
///
/// Alerts come out in KPI order and are cut at [`MAX_ALERTS`]; they are not
/// ranked. Critical KPIs without a matching rule produce nothing.
pub fn derive_alerts(kpis: &[Kpi]) -> Vec<AlertRecord> {
    kpis.iter()
        .filter(|kpi| kpi.is_priority(Priority::Critical))
        .flat_map(|kpi| {
            RULES
                .iter()
                .filter(move |rule| rule.kpi_name == kpi.name && (rule.fires)(kpi))
                .map(move |rule| (rule.render)(kpi))
        })
        .take(MAX_ALERTS)
        .collect()
}

pub fn rule_names() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|rule| rule.kpi_name)
}

#[cfg(test)]
mod tests {
    use super::{derive_alerts, rule_names, MAX_ALERTS};
    use crate::models::{Kpi, Priority};

    fn critical(id: u32, name: &str, unit: &str, value: f64) -> Kpi {
        Kpi::new(id, name, unit, "Financial Health", value)
            .expect("kpi")
            .with_priority(Priority::Critical)
    }

    #[test]
    fn stock_out_alert_embeds_value() {
        let kpis = vec![
            critical(1, "Stock-Out Instances per SKU", "count", 15.0),
            critical(2, "Order Fill Rate", "%", 94.2),
            critical(3, "Backorder Volume", "Million units", 2.4),
        ];
        let alerts = derive_alerts(&kpis);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].r#type, "stock-out");
        assert!(alerts[0].message.contains("15"));
        assert_eq!(alerts[0].message, "Critical: 15 stock-out instances detected across SKUs");
        assert_eq!(alerts[0].priority, Priority::Critical);
    }

    #[test]
    fn non_critical_kpis_are_ignored() {
        let kpis = vec![Kpi::new(1, "Stock-Out Instances per SKU", "count", "X", 50.0)
            .expect("kpi")
            .with_priority(Priority::High)];
        assert!(derive_alerts(&kpis).is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        let kpis = vec![
            critical(1, "Stock-Out Instances per SKU", "count", 10.0),
            critical(2, "Market Share", "%", 43.0),
            critical(3, "Cash Flow from Operations", "INR Billion", 1.5).with_target(1.5),
        ];
        assert!(derive_alerts(&kpis).is_empty());
    }

    #[test]
    fn cash_flow_needs_a_target() {
        let kpis = vec![critical(1, "Cash Flow from Operations", "INR Billion", 1.24)];
        assert!(derive_alerts(&kpis).is_empty());

        let kpis = vec![critical(1, "Cash Flow from Operations", "INR Billion", 1.24).with_target(1.5)];
        let alerts = derive_alerts(&kpis);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].impact, "₹0.26B gap to target");
    }

    #[test]
    fn cash_flow_gap_rounds_ties_up() {
        let kpis = vec![critical(1, "Cash Flow from Operations", "INR Billion", 1.375).with_target(1.5)];
        assert_eq!(derive_alerts(&kpis)[0].impact, "₹0.13B gap to target");
    }

    #[test]
    fn market_share_alert_is_high_priority() {
        let alerts = derive_alerts(&[critical(1, "Market Share", "%", 42.5)]);
        assert_eq!(alerts[0].r#type, "market-share");
        assert_eq!(alerts[0].priority, Priority::High);
    }

    #[test]
    fn keeps_kpi_order_and_caps_count() {
        let kpis = vec![
            critical(1, "Market Share", "%", 40.0),
            critical(2, "Stock-Out Instances per SKU", "count", 23.0),
            critical(3, "Cash Flow from Operations", "INR Billion", 1.0).with_target(2.0),
            critical(4, "Stock-Out Instances per SKU", "count", 30.0),
        ];
        let alerts = derive_alerts(&kpis);
        assert_eq!(alerts.len(), MAX_ALERTS);
        let types = alerts.iter().map(|a| a.r#type.as_str()).collect::<Vec<_>>();
        assert_eq!(types, vec!["market-share", "stock-out", "cash-flow"]);
    }

    #[test]
    fn every_alert_comes_from_a_rule() {
        let names = rule_names().collect::<Vec<_>>();
        let kpis = vec![
            critical(1, "Stock-Out Instances per SKU", "count", 11.0),
            critical(2, "Sales Return Rate", "%", 99.0),
        ];
        assert_eq!(derive_alerts(&kpis).len(), 1);
        assert!(kpis.iter().filter(|k| names.contains(&k.name.as_str())).count() >= 1);
    }

    #[test]
    fn empty_input_has_no_alerts() {
        assert!(derive_alerts(&[]).is_empty());
    }
}
