//! Assistant transcript storage
//!
//! Append-only record of the chat turns for the current session.

use crate::models::{AssistantMessage, MessageRole};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Chat transcript for one session
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    messages: Vec<AssistantMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            updated_at: Utc::now(),
            messages: Vec::new(),
        }
    }

    /// Fresh transcript holding only the login greeting.
    pub fn with_welcome(first_name: &str) -> Self {
        let mut transcript = Self::new();
        transcript.push(AssistantMessage::assistant(welcome_text(first_name)));
        transcript
    }

    pub fn push(&mut self, message: AssistantMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn messages(&self) -> &[AssistantMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Up to `count` of the newest messages, oldest first, trimmed so the
    /// window opens on a user turn.
    pub fn recent_turns(&self, count: usize) -> &[AssistantMessage] {
        let start = self.messages.len().saturating_sub(count);
        let window = &self.messages[start..];
        let first_user = window
            .iter()
            .position(|m| m.role == MessageRole::User)
            .unwrap_or(window.len());
        &window[first_user..]
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

pub fn welcome_text(first_name: &str) -> String {
    format!(
        "Welcome back, {}. I'm your RAKBANK Digital Assistant. How can I help you today?",
        first_name
    )
}
