//! Executive-summary insight cards and the canned transcript each one opens.

use crate::models::{InsightCard, InsightKind};

pub const FEATURED_INSIGHTS: usize = 4;

const CLOSING_PROMPT: &str = "What specific information would you like about this issue?";

struct Insight {
    card: InsightCard,
    transcript: &'static [&'static str],
}

static INSIGHTS: &[Insight] = &[
    Insight {
        card: InsightCard {
            id: "overselling",
            kind: InsightKind::Critical,
            title: "₹3.2L Lost to Overselling Today",
            description: "127 orders placed during inventory lag window were oversold today, resulting in ₹3.2 lakh refunds. Average inventory sync delay: 18 mins.",
            impact: "Majority impact: Bangalore, Hyderabad hubs",
        },
        transcript: &[
            "Overselling Alert Details",
            "• 127 orders were oversold today due to inventory sync delays",
            "• Total refund amount: ₹3.2 lakhs",
            "• Average inventory sync delay: 18 minutes",
            "• Most affected categories: Electronics (42%), Fashion (31%)",
            "• Primary cause: Inventory system lag during peak hours (11AM-2PM)",
        ],
    },
    Insight {
        card: InsightCard {
            id: "stockouts",
            kind: InsightKind::Warning,
            title: "Stockout Cancellations from Bangalore ↑35%",
            description: "Order cancellations due to stockouts rose 35% from baseline. Bangalore hub saw the highest spike (52 orders).",
            impact: "Potential lost revenue: ₹1.8L",
        },
        transcript: &[
            "Stockout Cancellations Details",
            "• Cancellations due to stockouts increased 35% from baseline",
            "• Bangalore hub most affected with 52 cancelled orders",
            "• Estimated revenue loss: ₹1.8 lakhs",
            "• Top affected products: Smartphones, Premium Apparel",
            "• Recommended action: Audit replenishment cycles and product velocity",
        ],
    },
    Insight {
        card: InsightCard {
            id: "tickets",
            kind: InsightKind::Warning,
            title: "78 Support Tickets Raised Due to Unavailable Items",
            description: "Customers flagged 78 orders as undelivered due to real-time inventory mismatch — a 2.2x increase from usual.",
            impact: "Customer satisfaction at risk",
        },
        transcript: &[
            "Support Tickets Details",
            "• 78 customer support tickets raised today",
            "• 2.2x increase from usual daily average",
            "• Primary complaint: Items showing as available but unavailable at checkout",
            "• Average resolution time: 4.3 hours (73% above normal)",
            "• Recommended action: Deploy auto-response and initiate sync diagnostics",
        ],
    },
    Insight {
        card: InsightCard {
            id: "synclag",
            kind: InsightKind::Critical,
            title: "Inventory Sync Lag Crossing SLA",
            description: "Today's average inventory sync lag is 21 minutes — exceeding acceptable SLA by 6 mins.",
            impact: "Delays primarily from: Bangalore & Ahmedabad zones",
        },
        transcript: &[
            "Inventory Sync Lag Details",
            "• Current average sync lag: 21 minutes",
            "• Exceeding acceptable SLA by 6 minutes",
            "• Primary affected zones: Bangalore (24 min) & Ahmedabad (19 min)",
            "• Root cause analysis: Database query optimization issues during peak load",
            "• Recommended action: Revisit integration throughput and update schedules",
        ],
    },
    Insight {
        card: InsightCard {
            id: "hubmismatch",
            kind: InsightKind::Warning,
            title: "₹2.1L in Revenue Delays Due to Hub Mismatch",
            description: "93 orders with hub assignment errors today. 41% came from Bangalore hub, causing cumulative delay of 9.6 hours and estimated ₹2.1L of delayed revenue.",
            impact: "Cash flow impact significant",
        },
        transcript: &[
            "Hub Assignment Error Details",
            "• 93 orders with hub assignment errors today",
            "• 41% originated from Bangalore hub",
            "• Cumulative delivery delay: 9.6 hours",
            "• Estimated delayed revenue: ₹2.1 lakhs",
            "• Recommended action: Audit hub assignment logic, adjust regional stock buffers",
        ],
    },
    Insight {
        card: InsightCard {
            id: "deliverydelay",
            kind: InsightKind::Warning,
            title: "Avg. Delivery Delay ↑3.2 Hours for Rerouted Orders",
            description: "Rerouted orders are being delivered 3.2 hours later than baseline SLA. Highest delays: Pune (4.1 hrs) and Bangalore (3.8 hrs) routes.",
            impact: "Customer experience deteriorating",
        },
        transcript: &[
            "Delivery Delay Details",
            "• Average delivery delay for rerouted orders: 3.2 hours",
            "• Highest delay routes: Pune (4.1 hrs) and Bangalore (3.8 hrs)",
            "• Customer satisfaction impact: 18% increase in negative feedback",
            "• Recommended action: Check alternate hub inventory and last-mile scheduling",
        ],
    },
    Insight {
        card: InsightCard {
            id: "logisticscost",
            kind: InsightKind::Warning,
            title: "₹85K Additional Logistics Cost from Rerouting",
            description: "Mismatch in hub inventory caused extra rerouting cost of ₹85K today. Repeat issue observed in Eastern region (₹32K).",
            impact: "Profit margins eroding",
        },
        transcript: &[
            "Additional Logistics Cost Details",
            "• Extra rerouting cost today: ₹85,000",
            "• Primary cause: Mismatch in hub inventory",
            "• Most affected region: Eastern (₹32,000)",
            "• Cost breakdown: Express shipping (62%), Additional handling (28%), Other (10%)",
            "• Recommended action: Consider predictive replenishment or hub capacity reshuffling",
        ],
    },
    Insight {
        card: InsightCard {
            id: "dropoff",
            kind: InsightKind::Critical,
            title: "9.1% Drop-off Due to Delayed Fulfillment",
            description: "Delayed fulfillment led to 113 order drop-offs today — a potential ₹4.5L revenue loss. Bangalore had highest impact.",
            impact: "Immediate intervention needed",
        },
        transcript: &[
            "Order Drop-off Details",
            "• Current drop-off rate: 9.1%",
            "• Total affected orders: 113",
            "• Potential revenue loss: ₹4.5 lakhs",
            "• Highest impact location: Bangalore",
            "• Customer segment most affected: Premium tier (58%)",
            "• Recommended action: Send alerts for time-sensitive SKUs with delivery guarantees",
        ],
    },
];

pub fn insight_cards() -> impl Iterator<Item = &'static InsightCard> {
    INSIGHTS.iter().map(|insight| &insight.card)
}

pub fn featured_insights() -> impl Iterator<Item = &'static InsightCard> {
    insight_cards().take(FEATURED_INSIGHTS)
}

/// Canned transcript for an insight, closing prompt included. `None` for
/// unknown ids.
pub fn transcript(insight_id: &str) -> Option<Vec<&'static str>> {
    INSIGHTS
        .iter()
        .find(|insight| insight.card.id == insight_id)
        .map(|insight| {
            let mut lines = insight.transcript.to_vec();
            lines.push(CLOSING_PROMPT);
            lines
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_card_has_a_transcript_ending_in_prompt() {
        for card in insight_cards() {
            let lines = transcript(card.id).expect("transcript");
            assert!(lines.len() > 2);
            assert_eq!(lines.last(), Some(&CLOSING_PROMPT));
        }
    }

    #[test]
    fn unknown_insight_has_no_transcript() {
        assert!(transcript("payroll").is_none());
    }

    #[test]
    fn features_first_four_cards() {
        let ids = featured_insights().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids, vec!["overselling", "stockouts", "tickets", "synclag"]);
        assert_eq!(insight_cards().count(), 8);
    }
}
