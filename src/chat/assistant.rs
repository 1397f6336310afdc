use super::keywords::{KeywordRoute, KeywordTable};
use crate::catalog::{
    FINANCIAL_HEALTH, LOGISTICS_DISTRIBUTION, PRODUCTION_INVENTORY, SALES_MARKET, STRATEGIC_PERFORMANCE,
};
use crate::formatter::chat_value_label;
use crate::models::{ChatMessage, Kpi, MetricLine, Priority, Sender};
use serde::Serialize;

const MAX_METRIC_LINES: usize = 4;
const UNDERPERFORMING_RATIO: f64 = 0.9;

pub const WELCOME_MESSAGE: &str = "Welcome, Managing Director. I'm your AI assistant for quick insights and decision support. How can I help you today?";
const WELCOME_FOLLOW_UPS: [&str; 3] = [
    "What are our key financial metrics?",
    "Show me critical issues",
    "Analyze market opportunities",
];

const DEFAULT_CONTENT: &str = "I can help you analyze various aspects of Amul's performance. Try asking about financial metrics, production efficiency, market analysis, or critical issues.";
const DEFAULT_FOLLOW_UPS: [&str; 3] = [
    "Show me financial performance",
    "What are the critical issues?",
    "How is production efficiency?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickInsight {
    pub label: &'static str,
    pub query: &'static str,
}

pub const QUICK_INSIGHTS: [QuickInsight; 8] = [
    QuickInsight {
        label: "Financial Performance",
        query: "What's our financial performance?",
    },
    QuickInsight {
        label: "Critical Issues",
        query: "What critical issues need my attention?",
    },
    QuickInsight {
        label: "Production Efficiency",
        query: "How is our production efficiency?",
    },
    QuickInsight {
        label: "Market Analysis",
        query: "Show me market share and competitive analysis",
    },
    QuickInsight {
        label: "Supply Chain Status",
        query: "Any supply chain or logistics issues?",
    },
    QuickInsight {
        label: "KPI Performance",
        query: "Which KPIs are underperforming?",
    },
    QuickInsight {
        label: "Strategic Targets",
        query: "How are we tracking against our targets?",
    },
    QuickInsight {
        label: "Operational Health",
        query: "Give me an operational health summary",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Financial,
    Critical,
    Production,
    Market,
    Supply,
    KpiHealth,
    Targets,
}

static TOPICS: KeywordTable<Topic> = KeywordTable::new(&[
    KeywordRoute {
        keywords: &["financial", "finance", "profit", "revenue"],
        target: Topic::Financial,
    },
    KeywordRoute {
        keywords: &["critical", "issues", "problems", "attention"],
        target: Topic::Critical,
    },
    KeywordRoute {
        keywords: &["production", "manufacturing", "plant", "efficiency"],
        target: Topic::Production,
    },
    KeywordRoute {
        keywords: &["market", "competitive", "share", "competitor"],
        target: Topic::Market,
    },
    KeywordRoute {
        keywords: &["supply", "logistics", "distribution", "delivery"],
        target: Topic::Supply,
    },
    KeywordRoute {
        keywords: &["kpi", "underperform", "metrics", "performance"],
        target: Topic::KpiHealth,
    },
    KeywordRoute {
        keywords: &["target", "goal", "tracking", "strategic"],
        target: Topic::Targets,
    },
]);

impl Topic {
    fn content(self) -> &'static str {
        match self {
            Self::Financial => "Here's a comprehensive view of our financial performance:",
            Self::Critical => "These critical areas require your immediate attention:",
            Self::Production => "Current production and inventory status:",
            Self::Market => "Market position and competitive analysis:",
            Self::Supply => "Supply chain and logistics performance:",
            Self::KpiHealth => "KPIs that need attention (below 90% of target):",
            Self::Targets => "Strategic performance against targets:",
        }
    }

    fn follow_ups(self) -> [&'static str; 3] {
        match self {
            Self::Financial => [
                "How does this compare to last quarter?",
                "What's driving our margin improvement?",
                "Where can we improve financially?",
            ],
            Self::Critical => [
                "What actions are being taken?",
                "Show me the root cause analysis",
                "When will these be resolved?",
            ],
            Self::Production => [
                "Which plants are underperforming?",
                "How can we improve utilization?",
                "What's the capacity forecast?",
            ],
            Self::Market => [
                "Which regions show growth potential?",
                "How do we compare to competitors?",
                "What's our brand strength?",
            ],
            Self::Supply => [
                "Any cold chain issues?",
                "How's our delivery performance?",
                "Fleet optimization opportunities?",
            ],
            Self::KpiHealth => [
                "What's causing the underperformance?",
                "Show me improvement plans",
                "Timeline for target achievement?",
            ],
            Self::Targets => [
                "Which targets are at risk?",
                "What's our forecast accuracy?",
                "Resource allocation needed?",
            ],
        }
    }

    fn selects(self, kpi: &Kpi) -> bool {
        match self {
            Self::Financial => kpi.section == FINANCIAL_HEALTH || kpi.section == STRATEGIC_PERFORMANCE,
            Self::Critical => kpi.is_priority(Priority::Critical) || kpi.is_priority(Priority::High),
            Self::Production => kpi.section == PRODUCTION_INVENTORY,
            Self::Market => {
                kpi.section == SALES_MARKET || kpi.name.contains("Market Share") || kpi.name.contains("Customer")
            }
            Self::Supply => kpi.section == LOGISTICS_DISTRIBUTION,
            // A zero target counts as no target.
            Self::KpiHealth => kpi
                .target
                .is_some_and(|target| target != 0.0 && kpi.value < target * UNDERPERFORMING_RATIO),
            Self::Targets => kpi.section == STRATEGIC_PERFORMANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricLine>>,
    pub follow_ups: Vec<String>,
}

impl AssistantReply {
    pub fn into_message(self) -> ChatMessage {
        let mut message = ChatMessage::new(Sender::Bot, self.content);
        message.metrics = self.metrics;
        message.follow_ups = Some(self.follow_ups);
        message
    }
}

pub fn classify(query: &str) -> Option<Topic> {
    TOPICS.route(query)
}

/// Answers a dashboard-wide question with live KPI lines for the matched topic.
pub fn answer(query: &str, kpis: &[Kpi]) -> AssistantReply {
    let Some(topic) = classify(query) else {
        tracing::debug!("assistant query fell through to default reply");
        return AssistantReply {
            content: DEFAULT_CONTENT.to_string(),
            metrics: None,
            follow_ups: DEFAULT_FOLLOW_UPS.iter().map(ToString::to_string).collect(),
        };
    };

    let abbreviate_billions = topic == Topic::Financial;
    let metrics = kpis
        .iter()
        .filter(|kpi| topic.selects(kpi))
        .take(MAX_METRIC_LINES)
        .map(|kpi| MetricLine {
            label: kpi.name.clone(),
            value: chat_value_label(kpi, abbreviate_billions),
            change: kpi.change.unwrap_or(0.0),
        })
        .collect::<Vec<_>>();
    tracing::debug!(?topic, metric_count = metrics.len(), "assistant query routed");

    AssistantReply {
        content: topic.content().to_string(),
        metrics: Some(metrics),
        follow_ups: topic.follow_ups().iter().map(ToString::to_string).collect(),
    }
}

pub fn welcome_message() -> ChatMessage {
    let mut message = ChatMessage::new(Sender::Bot, WELCOME_MESSAGE);
    message.follow_ups = Some(WELCOME_FOLLOW_UPS.iter().map(ToString::to_string).collect());
    message
}
