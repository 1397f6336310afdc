use crate::models::{ChatMessage, Sender};

#[derive(Debug, Default, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new(initial: Vec<ChatMessage>) -> Self {
        Self { messages: initial }
    }

    /// Canned system lines, in order.
    pub fn canned(lines: &[&str]) -> Self {
        Self {
            messages: lines.iter().map(|line| ChatMessage::system(*line)).collect(),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_from(&self, sender: Sender) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|message| message.sender == sender)
    }
}
