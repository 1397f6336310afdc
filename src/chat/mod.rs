pub mod assistant;
pub mod keywords;
pub mod responder;
pub mod transcript;

pub use assistant::{answer, AssistantReply, QuickInsight, Topic, QUICK_INSIGHTS};
pub use responder::{respond, DEFAULT_REPLY};
pub use transcript::ChatTranscript;
