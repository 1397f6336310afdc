use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

// ─── KPI records ────────────────────────────────────────────────────────────

/// Measurement unit of a KPI. Closed set: anything else is rejected when the
/// record is built or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Percent,
    InrBillion,
    InrMillion,
    InrCrores,
    MillionUnits,
    MillionLitres,
    OutOfTen,
    TimesPerYear,
    Hours,
    Days,
    Count,
    CountPerMonth,
}

impl Unit {
    pub const ALL: [Unit; 12] = [
        Self::Percent,
        Self::InrBillion,
        Self::InrMillion,
        Self::InrCrores,
        Self::MillionUnits,
        Self::MillionLitres,
        Self::OutOfTen,
        Self::TimesPerYear,
        Self::Hours,
        Self::Days,
        Self::Count,
        Self::CountPerMonth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::InrBillion => "INR Billion",
            Self::InrMillion => "INR Million",
            Self::InrCrores => "INR Crores",
            Self::MillionUnits => "Million units",
            Self::MillionLitres => "Million litres",
            Self::OutOfTen => "/10",
            Self::TimesPerYear => "times/year",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Count => "count",
            Self::CountPerMonth => "count/month",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == raw)
            .ok_or_else(|| AppError::Validation(format!("unknown KPI unit '{}'", raw)))
    }
}

impl TryFrom<String> for Unit {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Up,
    Down,
    Improving,
    Stable,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Improving => "improving",
            Self::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: u32,
    pub name: String,
    pub unit: Unit,
    pub section: String,
    #[serde(default)]
    pub description: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<f64>,
}

impl Kpi {
    /// Builds a record from raw strings, rejecting units outside [`Unit`].
    pub fn new(id: u32, name: &str, unit: &str, section: &str, value: f64) -> Result<Self, AppError> {
        Ok(Self {
            id,
            name: name.to_string(),
            unit: unit.parse()?,
            section: section.to_string(),
            description: String::new(),
            value,
            trend: None,
            change: None,
            target: None,
            priority: None,
            benchmark: None,
            history: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_history(mut self, history: Vec<f64>) -> Self {
        self.history = history;
        self
    }

    pub fn is_priority(&self, priority: Priority) -> bool {
        self.priority == Some(priority)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMeta {
    pub description: String,
    pub unit: Unit,
}

// ─── Derived view records ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub r#type: String,
    pub message: String,
    pub impact: String,
    pub action: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricLine {
    pub label: String,
    pub value: String,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetric {
    pub name: String,
    pub value: String,
    pub target: String,
    pub change: f64,
    pub trend: Trend,
    pub progress: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    Critical,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightCard {
    pub id: &'static str,
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTab {
    pub id: &'static str,
    pub label: &'static str,
}

// ─── Chat ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sender {
    User,
    Bot,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_ups: Option<Vec<String>>,
}

impl ChatMessage {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            content: content.into(),
            timestamp: Utc::now(),
            metrics: None,
            follow_ups: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Sender::System, content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum TopicState {
    Idle,
    #[serde(rename_all = "camelCase")]
    TopicOpen { insight_id: String },
}

// ─── Settings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub kpi_path: PathBuf,
    pub reply_delay_ms: u64,
    pub cancel_superseded_replies: bool,
    pub refresh_interval_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            kpi_path: PathBuf::from("data/kpis.json"),
            reply_delay_ms: 1_000,
            cancel_superseded_replies: true,
            refresh_interval_secs: None,
            log_dir: None,
        }
    }
}
