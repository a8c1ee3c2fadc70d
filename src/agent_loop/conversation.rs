//! Append-only conversation log for a single run.

use crate::error::RoamError;
use crate::types::{AgentToolCall, ModelMessage, Role};

/// Ordered message history owned by one request.
///
/// Messages are only ever appended. Tool-role messages must answer the
/// outstanding calls of the latest assistant turn, one per call and in call
/// order, and nothing else may be appended until every call is answered.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ModelMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation with the system and user messages.
    pub fn seeded(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![ModelMessage::system(system), ModelMessage::user(user)],
        }
    }

    pub fn append(&mut self, message: ModelMessage) -> Result<(), RoamError> {
        let pending = self.unanswered_calls();
        match (message.role, pending.first()) {
            (Role::Tool, Some(next)) => {
                let answered = message.tool_call_id().unwrap_or_default();
                if answered != next.id {
                    return Err(RoamError::InvalidArgument(format!(
                        "tool result for '{answered}' appended while '{}' is outstanding",
                        next.id
                    )));
                }
            }
            (Role::Tool, None) => {
                return Err(RoamError::InvalidArgument(
                    "tool result appended without an outstanding tool call".into(),
                ));
            }
            (role, Some(_)) => {
                return Err(RoamError::InvalidArgument(format!(
                    "{role:?} message appended while {} tool call(s) are unanswered",
                    pending.len()
                )));
            }
            (_, None) => {}
        }
        self.messages.push(message);
        Ok(())
    }

    pub fn last_message(&self) -> Option<&ModelMessage> {
        self.messages.last()
    }

    pub fn messages(&self) -> &[ModelMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ModelMessage> {
        self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Calls of the latest assistant turn that have no result yet, in call order.
    pub fn unanswered_calls(&self) -> Vec<&AgentToolCall> {
        let Some(turn) = self.messages.iter().rposition(|m| m.role == Role::Assistant) else {
            return Vec::new();
        };
        let answered = self.messages[turn + 1..]
            .iter()
            .filter(|m| m.role == Role::Tool)
            .count();
        self.messages[turn]
            .tool_calls()
            .into_iter()
            .skip(answered)
            .collect()
    }
}

/// Whether the most recent message is an assistant turn requesting tools.
pub fn should_continue(conversation: &Conversation) -> bool {
    conversation
        .last_message()
        .is_some_and(|m| m.role == Role::Assistant && !m.tool_calls().is_empty())
}
