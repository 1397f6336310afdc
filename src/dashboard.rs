use crate::alerts::derive_alerts;
use crate::catalog::{self, section_for_category, FINANCIAL_HEALTH, STRATEGIC_PERFORMANCE};
use crate::errors::AppResult;
use crate::formatter::{format_optional, format_plain, PLACEHOLDER};
use crate::mapper::{map_category, CategoryMaps};
use crate::models::{AlertRecord, AppSettings, DashboardTab, KeyMetric, Kpi, Trend};
use crate::session::{AssistantChat, InsightPanel, ReplyPolicy};
use crate::store::{load_kpis, load_snapshot, KpiSnapshot};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Values and metadata for one dashboard tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    pub category: String,
    pub section: Option<&'static str>,
    #[serde(flatten)]
    pub maps: CategoryMaps,
}

impl TabView {
    pub fn value(&self, key: &str) -> Option<f64> {
        self.maps.values.get(key).copied()
    }

    /// Formatted value for a view key, or `--` when the KPI is unavailable.
    pub fn display(&self, key: &str) -> String {
        match self.maps.meta.get(key) {
            Some(meta) => format_optional(self.value(key), meta.unit),
            None => PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Suffix {
    Percent,
    OutOfTen,
}

impl Suffix {
    fn render(self, value: f64) -> String {
        match self {
            Self::Percent => format!("{}%", format_plain(value)),
            Self::OutOfTen => format!("{}/10", format_plain(value)),
        }
    }
}

/// Headline cards of the executive summary: (label, section, KPI name, suffix).
const KEY_METRICS: [(&str, &str, &str, Suffix); 4] = [
    ("Revenue Growth", STRATEGIC_PERFORMANCE, "Revenue Growth Rate", Suffix::Percent),
    ("Market Share", STRATEGIC_PERFORMANCE, "Market Share", Suffix::Percent),
    (
        "Customer Satisfaction",
        STRATEGIC_PERFORMANCE,
        "Customer Satisfaction Score",
        Suffix::OutOfTen,
    ),
    ("Gross Profit Margin", FINANCIAL_HEALTH, "Gross Profit Margin", Suffix::Percent),
];

/// Rounded percent of target for a headline card. Not capped, and a missing
/// or zero target falls back to the value itself.
fn card_progress(value: f64, target: Option<f64>) -> u32 {
    let base = target.filter(|target| *target != 0.0).unwrap_or(value);
    let ratio = (value / base * 100.0).round();
    if ratio.is_finite() && ratio > 0.0 {
        ratio as u32
    } else {
        0
    }
}

struct DashboardInner {
    settings: AppSettings,
    snapshot: RwLock<KpiSnapshot>,
    insight_panel: InsightPanel,
    assistant: AssistantChat,
}

/// Everything one dashboard view owns: its KPI snapshot and its chat sessions.
#[derive(Clone)]
pub struct DashboardCore {
    inner: Arc<DashboardInner>,
}

impl DashboardCore {
    /// Loads the KPI resource named in `settings`. A failed load leaves the
    /// view with an empty snapshot rather than an error.
    pub async fn new(settings: AppSettings) -> Self {
        let snapshot = load_snapshot(&settings.kpi_path).await;
        Self::with_snapshot(settings, snapshot)
    }

    pub fn with_snapshot(settings: AppSettings, snapshot: KpiSnapshot) -> Self {
        let policy = ReplyPolicy::from_settings(&settings);
        Self {
            inner: Arc::new(DashboardInner {
                settings,
                snapshot: RwLock::new(snapshot),
                insight_panel: InsightPanel::new(policy),
                assistant: AssistantChat::new(policy),
            }),
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.inner.settings
    }

    pub fn tabs(&self) -> &'static [DashboardTab] {
        catalog::tabs()
    }

    pub fn kpis(&self) -> KpiSnapshot {
        match self.inner.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn kpi_by_name(&self, name: &str) -> Option<Kpi> {
        self.kpis().iter().find(|kpi| kpi.name == name).cloned()
    }

    pub fn tab_view(&self, category: &str) -> TabView {
        TabView {
            category: category.to_string(),
            section: section_for_category(category),
            maps: map_category(category, &self.kpis()),
        }
    }

    pub fn alerts(&self) -> Vec<AlertRecord> {
        derive_alerts(&self.kpis())
    }

    pub fn key_metrics(&self) -> Vec<KeyMetric> {
        let kpis = self.kpis();
        KEY_METRICS
            .iter()
            .filter_map(|(label, section, name, suffix)| {
                let kpi = kpis
                    .iter()
                    .find(|kpi| kpi.section == *section && kpi.name == *name)?;
                Some(KeyMetric {
                    name: label.to_string(),
                    value: suffix.render(kpi.value),
                    target: kpi
                        .target
                        .map(|target| suffix.render(target))
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                    change: kpi.change.unwrap_or(0.0),
                    trend: kpi.trend.unwrap_or(Trend::Stable),
                    progress: card_progress(kpi.value, kpi.target),
                })
            })
            .collect()
    }

    pub fn insight_panel(&self) -> &InsightPanel {
        &self.inner.insight_panel
    }

    pub fn assistant(&self) -> &AssistantChat {
        &self.inner.assistant
    }

    /// Re-reads the KPI resource. On failure the previous snapshot stays.
    pub async fn reload(&self) -> AppResult<usize> {
        let kpis = load_kpis(&self.inner.settings.kpi_path).await?;
        let count = kpis.len();
        self.replace_snapshot(kpis.into());
        Ok(count)
    }

    fn replace_snapshot(&self, snapshot: KpiSnapshot) {
        match self.inner.snapshot.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    /// Periodic reload driven by `refresh_interval_secs`; `None` when disabled.
    pub fn spawn_refresh(&self) -> Option<JoinHandle<()>> {
        let secs = self.inner.settings.refresh_interval_secs.filter(|secs| *secs > 0)?;
        let core = self.clone();
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(secs));
            interval.tick().await;
            loop {
                interval.tick().await;
                match core.reload().await {
                    Ok(count) => tracing::debug!(count, "KPI snapshot refreshed"),
                    Err(error) => tracing::warn!(error = %error, "KPI refresh failed, keeping previous snapshot"),
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{card_progress, DashboardCore};
    use crate::catalog::{FINANCIAL_HEALTH, PRODUCTION_INVENTORY, STRATEGIC_PERFORMANCE};
    use crate::models::{AppSettings, Kpi, Priority, Trend};

    fn snapshot() -> Vec<Kpi> {
        vec![
            Kpi::new(1, "Plant Utilization Rate", "%", PRODUCTION_INVENTORY, 78.5).expect("kpi"),
            Kpi::new(2, "Market Share", "%", STRATEGIC_PERFORMANCE, 42.5)
                .expect("kpi")
                .with_target(45.0)
                .with_change(-0.4)
                .with_trend(Trend::Down)
                .with_priority(Priority::Critical),
            Kpi::new(3, "Customer Satisfaction Score", "/10", STRATEGIC_PERFORMANCE, 8.4).expect("kpi"),
            Kpi::new(4, "Gross Profit Margin", "%", FINANCIAL_HEALTH, 32.8)
                .expect("kpi")
                .with_target(35.0),
        ]
    }

    fn core() -> DashboardCore {
        DashboardCore::with_snapshot(AppSettings::default(), snapshot().into())
    }

    #[test]
    fn tab_view_renders_values_and_placeholders() {
        let view = core().tab_view("production");
        assert_eq!(view.value("plantUtilizationRate"), Some(78.5));
        assert_eq!(view.display("plantUtilizationRate"), "78.5%");
        assert_eq!(view.display("productionCycleTime"), "--");

        let unknown = core().tab_view("sustainability");
        assert!(unknown.section.is_none());
        assert_eq!(unknown.display("plantUtilizationRate"), "--");
    }

    #[test]
    fn key_metrics_follow_card_order() {
        let metrics = core().key_metrics();
        let names = metrics.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Market Share", "Customer Satisfaction", "Gross Profit Margin"]);

        assert_eq!(metrics[0].value, "42.5%");
        assert_eq!(metrics[0].target, "45%");
        assert_eq!(metrics[0].progress, 94);
        assert_eq!(metrics[0].trend, Trend::Down);

        assert_eq!(metrics[1].value, "8.4/10");
        assert_eq!(metrics[1].target, "--");
        assert_eq!(metrics[1].progress, 100);
        assert_eq!(metrics[1].trend, Trend::Stable);
    }

    #[test]
    fn card_progress_is_not_capped() {
        let kpis = vec![Kpi::new(1, "Market Share", "%", STRATEGIC_PERFORMANCE, 49.5)
            .expect("kpi")
            .with_target(45.0)];
        let core = DashboardCore::with_snapshot(AppSettings::default(), kpis.into());
        assert_eq!(core.key_metrics()[0].progress, 110);

        assert_eq!(card_progress(12.0, Some(0.0)), 100);
        assert_eq!(card_progress(0.0, None), 0);
        assert_eq!(card_progress(-3.0, Some(10.0)), 0);
    }

    #[test]
    fn alerts_come_from_snapshot() {
        let alerts = core().alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].r#type, "market-share");
    }

    #[tokio::test]
    async fn missing_resource_gives_empty_view() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = AppSettings {
            kpi_path: dir.path().join("kpis.json"),
            ..AppSettings::default()
        };
        let core = DashboardCore::new(settings).await;
        assert!(core.kpis().is_empty());
        assert!(core.alerts().is_empty());
        assert!(core.reload().await.is_err());
        assert_eq!(core.tab_view("production").display("plantUtilizationRate"), "--");
    }

    #[tokio::test]
    async fn reload_swaps_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kpis.json");
        let settings = AppSettings {
            kpi_path: path.clone(),
            ..AppSettings::default()
        };
        let core = DashboardCore::with_snapshot(settings, snapshot().into());
        let before = core.kpis();

        std::fs::write(
            &path,
            r#"[{"id": 9, "name": "Fleet Utilization", "unit": "%", "section": "Logistics & Distribution", "value": 74.3}]"#,
        )
        .expect("write kpis");
        assert_eq!(core.reload().await.expect("reload"), 1);
        assert_eq!(core.tab_view("logistics").value("fleetUtilization"), Some(74.3));
        assert_eq!(before.len(), 4);

        std::fs::write(&path, "broken").expect("write kpis");
        assert!(core.reload().await.is_err());
        assert_eq!(core.kpis().len(), 1);
    }

    #[tokio::test]
    async fn refresh_is_off_by_default() {
        assert!(core().spawn_refresh().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_reloads_on_interval() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kpis.json");
        std::fs::write(&path, "[]").expect("write kpis");
        let settings = AppSettings {
            kpi_path: path.clone(),
            refresh_interval_secs: Some(30),
            ..AppSettings::default()
        };
        let core = DashboardCore::with_snapshot(settings, snapshot().into());
        let handle = core.spawn_refresh().expect("refresh task");

        for _ in 0..120 {
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            if core.kpis().is_empty() {
                break;
            }
        }
        handle.abort();
        assert!(core.kpis().is_empty());
    }
}
