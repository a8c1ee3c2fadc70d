//! One model turn over the current conversation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::conversation::Conversation;
use crate::error::RoamError;
use crate::provider::{ModelProvider, ProviderRequest};
use crate::tools::ToolRegistry;
use crate::types::{AssistantMessage, GenerationSettings, ResponseFormat, Usage};

/// An assistant turn plus the tokens it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTurn {
    pub message: AssistantMessage,
    pub usage: Usage,
}

/// Produces the next assistant turn.
///
/// Implementations read the conversation but never append to it.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(
        &self,
        conversation: &Conversation,
        tools: &ToolRegistry,
    ) -> Result<ModelTurn, RoamError>;
}

/// [`ModelInvoker`] backed by a [`ModelProvider`].
pub struct ProviderInvoker {
    provider: Arc<dyn ModelProvider>,
    settings: GenerationSettings,
    response_format: Option<ResponseFormat>,
}

impl ProviderInvoker {
    pub fn new(provider: Arc<dyn ModelProvider>, settings: GenerationSettings) -> Self {
        Self {
            provider,
            settings,
            response_format: None,
        }
    }

    /// Structured output format requested on every turn.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn provider(&self) -> &Arc<dyn ModelProvider> {
        &self.provider
    }
}

#[async_trait]
impl ModelInvoker for ProviderInvoker {
    async fn invoke(
        &self,
        conversation: &Conversation,
        tools: &ToolRegistry,
    ) -> Result<ModelTurn, RoamError> {
        let definitions = tools.definitions();
        let request = ProviderRequest {
            messages: conversation.messages().to_vec(),
            settings: self.settings.clone(),
            tools: (!definitions.is_empty()).then_some(definitions),
            response_format: self.response_format.clone(),
        };

        let response = self.provider.generate_text(&request).await.map_err(|err| {
            warn!(
                provider = self.provider.provider_name(),
                retryable = err.is_retryable(),
                error = %err,
                "provider call failed"
            );
            RoamError::ModelInvocation(format!(
                "{}:{}: {err}",
                self.provider.provider_name(),
                self.provider.model_id()
            ))
        })?;

        debug!(
            model = self.provider.model_id(),
            finish_reason = ?response.finish_reason,
            tool_calls = response.tool_calls.len(),
            "model responded"
        );

        if response.text.trim().is_empty() && response.tool_calls.is_empty() {
            return Err(RoamError::ModelInvocation(
                "model returned neither text nor tool calls".into(),
            ));
        }

        Ok(ModelTurn {
            message: AssistantMessage::from_parts(response.text, response.tool_calls),
            usage: response.usage,
        })
    }
}
