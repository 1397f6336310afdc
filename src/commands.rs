use crate::chat::{QuickInsight, QUICK_INSIGHTS};
use crate::dashboard::{DashboardCore, TabView};
use crate::errors::AppError;
use crate::formatter::sparkline;
use crate::insights::{featured_insights, insight_cards};
use crate::models::{AlertRecord, ChatMessage, DashboardTab, InsightCard, KeyMetric, TopicState};

/// State a presentation shell holds for one dashboard view.
#[derive(Clone)]
pub struct AppState {
    pub core: DashboardCore,
}

impl AppState {
    pub fn new(core: DashboardCore) -> Self {
        Self { core }
    }
}

pub fn list_tabs(state: &AppState) -> Result<Vec<DashboardTab>, String> {
    Ok(state.core.tabs().to_vec())
}

pub fn get_tab_view(state: &AppState, category: String) -> Result<TabView, String> {
    Ok(state.core.tab_view(&category))
}

pub fn get_alerts(state: &AppState) -> Result<Vec<AlertRecord>, String> {
    Ok(state.core.alerts())
}

pub fn get_key_metrics(state: &AppState) -> Result<Vec<KeyMetric>, String> {
    Ok(state.core.key_metrics())
}

pub fn get_sparkline(state: &AppState, kpi_name: String) -> Result<Vec<f64>, String> {
    state
        .core
        .kpi_by_name(&kpi_name)
        .map(|kpi| sparkline(&kpi))
        .ok_or_else(|| to_client_error(AppError::NotFound(format!("No KPI named '{}'", kpi_name))))
}

pub fn list_insights(featured_only: bool) -> Result<Vec<InsightCard>, String> {
    let cards = if featured_only {
        featured_insights().cloned().collect()
    } else {
        insight_cards().cloned().collect()
    };
    Ok(cards)
}

pub fn list_quick_insights() -> Result<Vec<QuickInsight>, String> {
    Ok(QUICK_INSIGHTS.to_vec())
}

pub async fn open_insight(state: &AppState, insight_id: String) -> Result<Vec<ChatMessage>, String> {
    state
        .core
        .insight_panel()
        .open_insight(&insight_id)
        .await
        .map_err(to_client_error)
}

pub async fn close_insight(state: &AppState) -> Result<(), String> {
    state.core.insight_panel().close().await;
    Ok(())
}

pub async fn get_insight_state(state: &AppState) -> Result<TopicState, String> {
    Ok(state.core.insight_panel().state().await)
}

/// Returns the accepted user message; `None` for blank input or while no
/// insight is open.
pub async fn send_insight_message(state: &AppState, text: String) -> Result<Option<ChatMessage>, String> {
    Ok(state.core.insight_panel().submit(&text).await)
}

pub async fn get_insight_messages(state: &AppState) -> Result<Vec<ChatMessage>, String> {
    Ok(state.core.insight_panel().messages().await)
}

pub async fn send_assistant_message(state: &AppState, text: String) -> Result<Option<ChatMessage>, String> {
    let kpis = state.core.kpis();
    Ok(state.core.assistant().submit(&text, &kpis).await)
}

pub async fn get_assistant_messages(state: &AppState) -> Result<Vec<ChatMessage>, String> {
    Ok(state.core.assistant().messages().await)
}

pub async fn reload_kpis(state: &AppState) -> Result<usize, String> {
    state.core.reload().await.map_err(to_client_error)
}

pub(crate) fn to_client_error(error: impl std::fmt::Display) -> String {
    error.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STRATEGIC_PERFORMANCE;
    use crate::models::{AppSettings, Kpi};

    fn state() -> AppState {
        let kpis = vec![Kpi::new(1, "Market Share", "%", STRATEGIC_PERFORMANCE, 42.5)
            .expect("kpi")
            .with_history(vec![41.0, 42.0, 42.5])];
        AppState::new(DashboardCore::with_snapshot(AppSettings::default(), kpis.into()))
    }

    #[tokio::test]
    async fn unknown_insight_is_a_client_error() {
        let err = open_insight(&state(), "payroll".to_string())
            .await
            .expect_err("unknown insight");
        assert_eq!(err, "NOT_FOUND: No insight 'payroll'");
    }

    #[test]
    fn sparkline_uses_recorded_history() {
        let points = get_sparkline(&state(), "Market Share".to_string()).expect("sparkline");
        assert_eq!(points, vec![41.0, 42.0, 42.5]);
        assert!(get_sparkline(&state(), "Revenue".to_string()).is_err());
    }

    #[test]
    fn insight_listing_respects_featured_flag() {
        assert_eq!(list_insights(true).expect("featured").len(), 4);
        assert_eq!(list_insights(false).expect("all").len(), 8);
        assert_eq!(list_quick_insights().expect("quick").len(), 8);
    }
}
