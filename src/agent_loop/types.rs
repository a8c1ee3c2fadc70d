//! Core run types for the agent loop.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{AgentToolCall, ModelMessage, Usage};

/// Unique run identifier.
pub type RunId = Uuid;

/// Graph controller state.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    AwaitingModel,
    /// Calls from the latest assistant turn, in the order the model emitted them.
    AwaitingTools(Vec<AgentToolCall>),
    /// Terminal; carries the final answer text.
    Done(String),
}

/// Successful run output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub run_id: RunId,
    pub final_text: String,
    pub messages: Vec<ModelMessage>,
    pub usage: Usage,
    /// Model-to-tools round trips taken.
    pub rounds: usize,
}
