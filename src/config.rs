use crate::errors::AppResult;
use crate::models::AppSettings;
use anyhow::Context;
use std::path::Path;

/// Reads dashboard settings from a YAML file. A missing file yields the
/// defaults; a present but malformed file is an error.
pub fn load_settings(path: &Path) -> AppResult<AppSettings> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no settings file, using defaults");
        return Ok(AppSettings::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings = parse_settings(&raw).with_context(|| format!("parsing settings in {}", path.display()))?;
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> anyhow::Result<AppSettings> {
    if raw.trim().is_empty() {
        return Ok(AppSettings::default());
    }
    let settings: AppSettings = serde_yaml::from_str(raw)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::{load_settings, parse_settings};
    use crate::models::AppSettings;
    use std::path::PathBuf;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(&dir.path().join("dashboard.yaml")).expect("settings");
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn reads_partial_yaml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dashboard.yaml");
        std::fs::write(
            &path,
            "kpiPath: /srv/kpis.json\nreplyDelayMs: 250\ncancelSupersededReplies: false\nrefreshIntervalSecs: 60\n",
        )
        .expect("write settings");

        let settings = load_settings(&path).expect("settings");
        assert_eq!(settings.kpi_path, PathBuf::from("/srv/kpis.json"));
        assert_eq!(settings.reply_delay_ms, 250);
        assert!(!settings.cancel_superseded_replies);
        assert_eq!(settings.refresh_interval_secs, Some(60));
        assert_eq!(settings.log_dir, None);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dashboard.yaml");
        std::fs::write(&path, "replyDelayMs: [not a number").expect("write settings");
        let err = load_settings(&path).expect_err("malformed");
        assert!(err.to_string().contains("dashboard.yaml"));
        assert!(matches!(err, crate::errors::AppError::Internal(_)));
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        assert_eq!(parse_settings("  \n").expect("settings"), AppSettings::default());
    }
}
