use crate::catalog::categories;
use crate::errors::{AppError, AppResult};
use crate::mapper::duplicate_view_keys;
use crate::models::Kpi;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Immutable KPI list shared by everything a view renders.
pub type KpiSnapshot = Arc<[Kpi]>;

pub fn parse_kpis(raw: &str) -> AppResult<Vec<Kpi>> {
    let kpis: Vec<Kpi> = serde_json::from_str(raw)?;
    let mut ids = HashSet::new();
    for kpi in &kpis {
        if !ids.insert(kpi.id) {
            return Err(AppError::Validation(format!("duplicate KPI id {}", kpi.id)));
        }
    }
    Ok(kpis)
}

pub async fn load_kpis(path: &Path) -> AppResult<Vec<Kpi>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| AppError::Load(format!("{}: {}", path.display(), error)))?;
    let kpis = parse_kpis(&raw)?;
    report_loaded(path, &kpis);
    Ok(kpis)
}

/// Loads the KPI resource, degrading to an empty snapshot on any failure.
pub async fn load_snapshot(path: &Path) -> KpiSnapshot {
    match load_kpis(path).await {
        Ok(kpis) => kpis.into(),
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "KPI resource unavailable, rendering placeholders");
            Vec::new().into()
        }
    }
}

fn report_loaded(path: &Path, kpis: &[Kpi]) {
    tracing::info!(path = %path.display(), count = kpis.len(), "KPI resource loaded");
    for category in categories() {
        let duplicates = duplicate_view_keys(category, kpis);
        if !duplicates.is_empty() {
            tracing::warn!(category, ?duplicates, "duplicate KPI names, last entry wins");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_KPIS: &str = r#"[
        {"id": 1, "name": "Plant Utilization Rate", "unit": "%", "section": "Production & Inventory Health",
         "description": "Utilization", "value": 78.5, "target": 80},
        {"id": 2, "name": "Fleet Utilization", "unit": "%", "section": "Logistics & Distribution",
         "description": "Fleet", "value": 74.3}
    ]"#;

    fn write_resource(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write resource");
        file
    }

    #[tokio::test]
    async fn loads_records_in_order() {
        let file = write_resource(TWO_KPIS);
        let kpis = load_kpis(file.path()).await.expect("load");
        assert_eq!(kpis.iter().map(|k| k.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(kpis[0].target, Some(80.0));
    }

    #[tokio::test]
    async fn missing_resource_degrades_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snapshot = load_snapshot(&dir.path().join("absent.json")).await;
        assert!(snapshot.is_empty());
        assert!(load_kpis(&dir.path().join("absent.json")).await.is_err());
    }

    #[tokio::test]
    async fn malformed_resource_degrades_to_empty() {
        let file = write_resource("{ not json");
        assert!(load_snapshot(file.path()).await.is_empty());
        assert!(matches!(load_kpis(file.path()).await, Err(AppError::Load(_))));
    }

    #[tokio::test]
    async fn unknown_unit_rejects_resource() {
        let file = write_resource(
            r#"[{"id": 1, "name": "X", "unit": "bushels", "section": "Y", "description": "", "value": 1}]"#,
        );
        assert!(load_kpis(file.path()).await.is_err());
        assert!(load_snapshot(file.path()).await.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"[
            {"id": 1, "name": "A", "unit": "%", "section": "S", "value": 1},
            {"id": 1, "name": "B", "unit": "%", "section": "S", "value": 2}
        ]"#;
        assert!(matches!(parse_kpis(raw), Err(AppError::Validation(_))));
    }
}
