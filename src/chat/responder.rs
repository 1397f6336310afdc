use super::keywords::{KeywordRoute, KeywordTable};

pub const DEFAULT_REPLY: &str = "I don't have specific information about that. Try asking about causes, fixes, impact, or specific hubs like Bangalore.";

const WHY_REPLY: &str = "The primary causes are: 1) Inventory system lag during peak hours, 2) Insufficient buffer stock in high-demand hubs, 3) Database query optimization issues, and 4) Outdated hub assignment logic that doesn't account for real-time inventory.";
const FIX_REPLY: &str = "Immediate fixes include: 1) Reduce sync intervals to 5 minutes, 2) Implement 15% safety stock buffer, 3) Deploy auto-response system for affected customers, and 4) Revise routing algorithms to prioritize inventory availability.";
const IMPACT_REPLY: &str = "The total financial impact is approximately ₹9.6 lakhs, including ₹3.2L in refunds, ₹1.8L in stockout cancellations, ₹2.1L in delayed revenue, ₹85K in additional logistics costs, and ₹4.5L in potential revenue loss from drop-offs.";
const BANGALORE_REPLY: &str = "Bangalore hub is experiencing the most severe issues with 52 stockout cancellations, 41% of all hub assignment errors, and the highest order drop-off rate (9.1%). This appears to be due to high order volume combined with insufficient inventory buffers.";
const SYNC_REPLY: &str = "Current sync lag is 21 minutes (6 minutes above SLA). The lag is primarily affecting Bangalore (24 min) and Ahmedabad (19 min) zones. Root cause appears to be database query optimization issues during peak load periods.";
const HELP_REPLY: &str = "You can ask about causes, recommended fixes, financial impact, specific hubs like Bangalore, or details about the inventory sync lag. You can also ask for specific action plans to address these issues.";

static REPLIES: KeywordTable<&'static str> = KeywordTable::new(&[
    KeywordRoute {
        keywords: &["why"],
        target: WHY_REPLY,
    },
    KeywordRoute {
        keywords: &["fix"],
        target: FIX_REPLY,
    },
    KeywordRoute {
        keywords: &["impact"],
        target: IMPACT_REPLY,
    },
    KeywordRoute {
        keywords: &["bangalore"],
        target: BANGALORE_REPLY,
    },
    KeywordRoute {
        keywords: &["sync"],
        target: SYNC_REPLY,
    },
    KeywordRoute {
        keywords: &["help"],
        target: HELP_REPLY,
    },
]);

/// Canned reply for a free-text question inside an open insight panel.
pub fn respond(query: &str) -> &'static str {
    let reply = REPLIES.route(query);
    tracing::debug!(matched = reply.is_some(), "insight chat routed");
    reply.unwrap_or(DEFAULT_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_question_gets_fix_reply() {
        assert_eq!(respond("what should I fix"), FIX_REPLY);
    }

    #[test]
    fn unmatched_query_gets_default() {
        assert_eq!(respond("xyzzy"), DEFAULT_REPLY);
        assert_eq!(respond(""), DEFAULT_REPLY);
        assert_eq!(respond("   "), DEFAULT_REPLY);
    }

    #[test]
    fn earlier_keyword_beats_later_one() {
        assert_eq!(respond("why does bangalore fail"), WHY_REPLY);
        assert_eq!(respond("bangalore sync"), BANGALORE_REPLY);
    }

    #[test]
    fn matching_ignores_case_and_position() {
        assert_eq!(respond("Show me the IMPACT"), IMPACT_REPLY);
        assert_eq!(respond("resync"), SYNC_REPLY);
        assert_eq!(respond("HELP"), HELP_REPLY);
    }

    #[test]
    fn replies_are_deterministic() {
        for query in ["why", "fix it", "impact?", "nothing here"] {
            assert_eq!(respond(query), respond(query));
        }
    }
}
