use crate::chat::transcript::ChatTranscript;
use crate::chat::{answer, respond};
use crate::errors::{AppError, AppResult};
use crate::insights;
use crate::models::{AppSettings, ChatMessage, Kpi, TopicState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyPolicy {
    pub delay: Duration,
    /// Abort a still-pending reply when the next message is submitted.
    pub cancel_superseded: bool,
}

impl ReplyPolicy {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            delay: Duration::from_millis(settings.reply_delay_ms),
            cancel_superseded: settings.cancel_superseded_replies,
        }
    }
}

impl Default for ReplyPolicy {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

#[derive(Debug, Default)]
struct SessionState {
    topic: Option<String>,
    transcript: ChatTranscript,
    pending: Vec<JoinHandle<()>>,
    generation: u64,
}

impl SessionState {
    fn abort_pending(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }

    fn reset(&mut self, topic: Option<String>, transcript: ChatTranscript) {
        self.abort_pending();
        self.generation += 1;
        self.topic = topic;
        self.transcript = transcript;
    }
}

/// Transcript plus delayed-reply bookkeeping shared by the chat surfaces.
#[derive(Clone)]
pub struct ChatSession {
    session_id: String,
    state: Arc<Mutex<SessionState>>,
    policy: ReplyPolicy,
}

impl ChatSession {
    pub fn new(policy: ReplyPolicy, initial: Vec<ChatMessage>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            state: Arc::new(Mutex::new(SessionState {
                transcript: ChatTranscript::new(initial),
                ..SessionState::default()
            })),
            policy,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        let state = self.state.lock().await;
        state.transcript.messages().to_vec()
    }

    pub async fn pending_replies(&self) -> usize {
        let mut state = self.state.lock().await;
        state.pending.retain(|handle| !handle.is_finished());
        state.pending.len()
    }

    /// Appends the user's message now and `reply` once the policy delay elapses.
    /// Blank input is ignored.
    pub async fn submit_with(&self, text: &str, reply: ChatMessage) -> Option<ChatMessage> {
        self.schedule(text, reply, false).await
    }

    /// Like [`Self::submit_with`], but only while a topic is open.
    pub async fn submit_to_topic(&self, text: &str, reply: ChatMessage) -> Option<ChatMessage> {
        self.schedule(text, reply, true).await
    }

    async fn schedule(&self, text: &str, reply: ChatMessage, requires_topic: bool) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        let mut state = self.state.lock().await;
        if requires_topic && state.topic.is_none() {
            tracing::debug!(session_id = %self.session_id, "ignoring input with no open topic");
            return None;
        }
        let user_message = ChatMessage::user(text);
        state.transcript.push(user_message.clone());
        if self.policy.cancel_superseded {
            state.abort_pending();
        }
        state.pending.retain(|handle| !handle.is_finished());

        let generation = state.generation;
        let delay = self.policy.delay;
        let shared = self.state.clone();
        let session_id = self.session_id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.lock().await;
            if state.generation != generation {
                tracing::debug!(session_id = %session_id, "dropping reply for a reset session");
                return;
            }
            state.transcript.push(reply);
        });
        state.pending.push(handle);

        Some(user_message)
    }

    /// Waits until every scheduled reply has landed or been cancelled.
    pub async fn flush(&self) {
        let pending = {
            let mut state = self.state.lock().await;
            std::mem::take(&mut state.pending)
        };
        for handle in pending {
            if let Err(error) = handle.await {
                if !error.is_cancelled() {
                    tracing::warn!(session_id = %self.session_id, error = %error, "chat reply task failed");
                }
            }
        }
    }

    async fn reset(&self, topic: Option<String>, transcript: ChatTranscript) {
        let mut state = self.state.lock().await;
        state.reset(topic, transcript);
    }

    async fn topic(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.topic.clone()
    }
}

/// The "know more" panel of the executive summary: idle until an insight is
/// opened, then a canned transcript followed by keyword-matched replies.
#[derive(Clone)]
pub struct InsightPanel {
    chat: ChatSession,
}

impl InsightPanel {
    pub fn new(policy: ReplyPolicy) -> Self {
        Self {
            chat: ChatSession::new(policy, Vec::new()),
        }
    }

    pub fn session_id(&self) -> &str {
        self.chat.session_id()
    }

    pub async fn state(&self) -> TopicState {
        match self.chat.topic().await {
            Some(insight_id) => TopicState::TopicOpen { insight_id },
            None => TopicState::Idle,
        }
    }

    /// Loads the canned transcript of `insight_id`, replacing whatever was open.
    pub async fn open_insight(&self, insight_id: &str) -> AppResult<Vec<ChatMessage>> {
        let lines = insights::transcript(insight_id)
            .ok_or_else(|| AppError::NotFound(format!("No insight '{}'", insight_id)))?;
        self.chat
            .reset(Some(insight_id.to_string()), ChatTranscript::canned(&lines))
            .await;
        tracing::info!(session_id = %self.chat.session_id(), insight_id, "insight panel opened");
        Ok(self.chat.messages().await)
    }

    pub async fn close(&self) {
        self.chat.reset(None, ChatTranscript::default()).await;
        tracing::info!(session_id = %self.chat.session_id(), "insight panel closed");
    }

    /// Free text for the open insight. Ignored while the panel is idle.
    pub async fn submit(&self, text: &str) -> Option<ChatMessage> {
        self.chat
            .submit_to_topic(text, ChatMessage::system(respond(text)))
            .await
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.chat.messages().await
    }

    pub async fn flush(&self) {
        self.chat.flush().await;
    }

    pub async fn pending_replies(&self) -> usize {
        self.chat.pending_replies().await
    }
}

/// The dashboard-wide assistant chat, opened with a welcome message.
#[derive(Clone)]
pub struct AssistantChat {
    chat: ChatSession,
}

impl AssistantChat {
    pub fn new(policy: ReplyPolicy) -> Self {
        Self {
            chat: ChatSession::new(policy, vec![crate::chat::assistant::welcome_message()]),
        }
    }

    pub fn session_id(&self) -> &str {
        self.chat.session_id()
    }

    pub async fn submit(&self, text: &str, kpis: &[Kpi]) -> Option<ChatMessage> {
        let reply = answer(text, kpis).into_message();
        self.chat.submit_with(text, reply).await
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.chat.messages().await
    }

    pub async fn flush(&self) {
        self.chat.flush().await;
    }
}
